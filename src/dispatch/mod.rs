//! Buffered fan-out dispatch
//!
//! The [`AppenderRegistry`] holds the ordered set of delivery sinks; the
//! [`BufferedDispatcher`] accumulates events, applies the eviction and
//! trigger policy, and drives the registry. The [`Pipeline`] facade wires a
//! filter chain in front of the engine.

pub mod buffered;
pub mod pipeline;
pub mod registry;

pub use buffered::{BufferedDispatcher, BufferedDispatcherBuilder, TriggerPredicate};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use registry::AppenderRegistry;

use crate::core::{LogEvent, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// A delivery sink attached to the dispatch engine
///
/// Implementations are external collaborators; delivery may block, but
/// that blocking is the sink's concern, not the engine's.
pub trait Appender: Send + Sync {
    fn append(&mut self, event: &LogEvent) -> Result<()>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Shared handle to an attached appender
///
/// Handle identity (the `Arc` allocation) is what the registry dedups and
/// removes by.
pub type AppenderHandle = Arc<Mutex<dyn Appender>>;

/// Wrap an appender into a sharable handle
pub fn handle<A: Appender + 'static>(appender: A) -> AppenderHandle {
    Arc::new(Mutex::new(appender))
}
