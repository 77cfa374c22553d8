//! Convenience appender implementations
//!
//! Concrete file/socket/mail/database sinks are external collaborators and
//! live outside this crate; these two exist for tests, demos and simple
//! console setups.

pub mod memory;

#[cfg(feature = "console")]
pub mod console;

pub use memory::MemoryAppender;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;

// Re-export the sink contract next to its implementations
pub use crate::dispatch::Appender;
