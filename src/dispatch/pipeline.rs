//! Pipeline facade tying filters to the dispatch engine

use super::buffered::{BufferedDispatcher, BufferedDispatcherBuilder};
use super::{Appender, AppenderHandle, AppenderRegistry};
use crate::core::{
    Diagnostics, DiagnosticHandler, EngineMetrics, EventContext, LogEvent, LogLevel, Result,
};
use crate::filter::{Filter, FilterChain};
use std::sync::Arc;

/// Entry point for logging calls
///
/// An event enters the filter chain; if accepted it is handed to the
/// buffering engine, which eventually dispatches through the attachment
/// registry to every appender.
///
/// # Example
///
/// ```
/// use log_pipeline::appenders::MemoryAppender;
/// use log_pipeline::filter::LevelRangeFilter;
/// use log_pipeline::{LogLevel, Pipeline};
///
/// let memory = MemoryAppender::new("memory");
/// let probe = memory.clone();
///
/// let pipeline = Pipeline::builder()
///     .filter(LevelRangeFilter::at_least(LogLevel::Info))
///     .capacity(0)
///     .appender(memory)
///     .build();
///
/// pipeline.debug("filtered out").unwrap();
/// pipeline.info("delivered").unwrap();
/// assert_eq!(probe.messages(), vec!["delivered"]);
/// ```
pub struct Pipeline {
    filters: FilterChain,
    engine: BufferedDispatcher,
}

impl Pipeline {
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run an event through the filter chain and, when accepted, the
    /// engine
    ///
    /// Returns whether the event was accepted. Neutral chain outcomes
    /// count as accepted.
    pub fn log_event(&self, event: impl Into<Arc<LogEvent>>) -> Result<bool> {
        let event = event.into();
        if !self.filters.accepts(&event) {
            return Ok(false);
        }
        self.engine.append(event)?;
        Ok(true)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.log_event(LogEvent::new(level, message)).map(|_| ())
    }

    /// Log with ambient context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: EventContext,
    ) -> Result<()> {
        self.log_event(LogEvent::new(level, message).with_context(context))
            .map(|_| ())
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Trace, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    /// Deliver everything buffered now
    pub fn flush(&self) -> Result<()> {
        self.engine.flush()
    }

    /// Flush and close the engine and every appender; idempotent
    pub fn close(&self) -> Result<()> {
        self.engine.close()
    }

    pub fn registry(&self) -> &AppenderRegistry {
        self.engine.registry()
    }

    pub fn metrics(&self) -> &EngineMetrics {
        self.engine.metrics()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        self.engine.diagnostics()
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("filters", &self.filters)
            .field("engine", &self.engine)
            .finish()
    }
}

/// Builder for [`Pipeline`]
///
/// # Example
///
/// ```
/// use log_pipeline::appenders::MemoryAppender;
/// use log_pipeline::filter::ContextValueFilter;
/// use log_pipeline::{LogLevel, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .filter(ContextValueFilter::new("tenant").with_substring("internal"))
///     .capacity(256)
///     .lossy(true)
///     .trigger_at_level(LogLevel::Error)
///     .appender(MemoryAppender::new("memory"))
///     .build();
/// ```
pub struct PipelineBuilder {
    filters: FilterChain,
    engine: BufferedDispatcherBuilder,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            filters: FilterChain::new(),
            engine: BufferedDispatcher::builder(),
        }
    }

    /// Append a filter; evaluation order is registration order
    #[must_use = "builder methods return a new value"]
    pub fn filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.add(filter);
        self
    }

    /// Buffer capacity; 0 flushes every event immediately
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.engine = self.engine.capacity(capacity);
        self
    }

    /// Lossy mode: ring-buffer overwrite instead of capacity flush
    #[must_use = "builder methods return a new value"]
    pub fn lossy(mut self, lossy: bool) -> Self {
        self.engine = self.engine.lossy(lossy);
        self
    }

    /// Custom trigger predicate over (incoming event, buffer contents)
    #[must_use = "builder methods return a new value"]
    pub fn trigger<F>(mut self, trigger: F) -> Self
    where
        F: Fn(&LogEvent, &[Arc<LogEvent>]) -> bool + Send + Sync + 'static,
    {
        self.engine = self.engine.trigger(trigger);
        self
    }

    /// Flush whenever an event at or above `level` arrives
    #[must_use = "builder methods return a new value"]
    pub fn trigger_at_level(mut self, level: LogLevel) -> Self {
        self.engine = self.engine.trigger_at_level(level);
        self
    }

    /// Replace the default stderr diagnostics handler
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, handler: DiagnosticHandler) -> Self {
        self.engine = self
            .engine
            .diagnostics(Arc::new(Diagnostics::with_handler(handler)));
        self
    }

    /// Attach an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.engine = self.engine.appender(appender);
        self
    }

    /// Attach an existing appender handle
    #[must_use = "builder methods return a new value"]
    pub fn attach(mut self, handle: AppenderHandle) -> Self {
        self.engine = self.engine.attach(handle);
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            filters: self.filters,
            engine: self.engine.build(),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
