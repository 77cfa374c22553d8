//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Each expands to
//! the corresponding [`Pipeline`](crate::Pipeline) call and yields its
//! `Result`.
//!
//! # Examples
//!
//! ```
//! use log_pipeline::{info, Pipeline};
//!
//! let pipeline = Pipeline::builder().capacity(0).build();
//!
//! // Basic logging
//! info!(pipeline, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! info!(pipeline, "Server listening on port {}", port).unwrap();
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use log_pipeline::{LogLevel, Pipeline};
/// # let pipeline = Pipeline::builder().capacity(0).build();
/// use log_pipeline::log;
/// log!(pipeline, LogLevel::Info, "Simple message").unwrap();
/// log!(pipeline, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($pipeline:expr, $level:expr, $($arg:tt)+) => {
        $pipeline.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($pipeline:expr, $($arg:tt)+) => {
        $crate::log!($pipeline, $crate::LogLevel::Fatal, $($arg)+)
    };
}
