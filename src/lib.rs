//! # Log Pipeline
//!
//! The event-processing core of a structured logging framework: pattern
//! layouts, filter chains, buffered fan-out dispatch, and type-directed
//! object rendering.
//!
//! ## Features
//!
//! - **Pattern Layouts**: `"[%date] [%-5level] %message"` compiled once,
//!   rendered lock-free by any number of threads
//! - **Ternary Filters**: Accept/Deny/Neutral chains with level, substring
//!   and regex filters
//! - **Buffered Dispatch**: bounded buffering with lossy or flush-on-full
//!   eviction, trigger predicates, and per-appender failure isolation
//! - **Object Rendering**: a total type-to-renderer map with recursive
//!   error rendering

pub mod appenders;
pub mod core;
pub mod dispatch;
pub mod filter;
pub mod macros;
pub mod pattern;
pub mod render;

pub mod prelude {
    pub use crate::appenders::MemoryAppender;
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::core::{
        Diagnostics, EngineMetrics, EventContext, FieldValue, LogEvent, LogLevel, PipelineError,
        Result, TimestampFormat,
    };
    pub use crate::dispatch::{
        handle, Appender, AppenderRegistry, BufferedDispatcher, Pipeline, PipelineBuilder,
    };
    pub use crate::filter::{
        ContextValueFilter, Filter, FilterChain, FilterDecision, LevelMatchFilter,
        LevelRangeFilter,
    };
    pub use crate::pattern::{CompiledPattern, Converter, ConverterRegistry, FormatSpec};
    pub use crate::render::{ErrorDetails, LoggedError, RenderMap, Renderable};
}

pub use crate::appenders::MemoryAppender;
#[cfg(feature = "console")]
pub use crate::appenders::ConsoleAppender;
pub use crate::core::{
    Diagnostics, EngineMetrics, EventContext, FieldValue, LogEvent, LogLevel, PipelineError,
    Result, TimestampFormat,
};
pub use crate::dispatch::{
    handle, Appender, AppenderRegistry, BufferedDispatcher, Pipeline, PipelineBuilder,
};
pub use crate::filter::{
    ContextValueFilter, Filter, FilterChain, FilterDecision, LevelMatchFilter, LevelRangeFilter,
};
pub use crate::pattern::{CompiledPattern, Converter, ConverterRegistry, FormatSpec};
pub use crate::render::{ErrorDetails, LoggedError, RenderMap, Renderable};
