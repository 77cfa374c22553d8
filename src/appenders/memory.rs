//! In-memory collecting appender

use crate::core::{LogEvent, PipelineError, Result};
use crate::dispatch::Appender;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Collects delivered events in memory
///
/// Clones share the same backing store, so a clone kept outside the
/// registry observes everything delivered to the attached instance.
///
/// # Example
///
/// ```
/// use log_pipeline::appenders::MemoryAppender;
/// use log_pipeline::dispatch::Appender;
/// use log_pipeline::{LogEvent, LogLevel};
///
/// let mut appender = MemoryAppender::new("memory");
/// let probe = appender.clone();
///
/// appender.append(&LogEvent::new(LogLevel::Info, "captured")).unwrap();
/// assert_eq!(probe.messages(), vec!["captured"]);
/// ```
#[derive(Clone)]
pub struct MemoryAppender {
    name: String,
    events: Arc<Mutex<Vec<LogEvent>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryAppender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of delivered events in arrival order
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Snapshot of delivered message texts in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn delivered_count(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// Drop everything collected so far
    pub fn reset(&self) {
        self.events.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        if self.is_closed() {
            return Err(PipelineError::sink(&self.name, "appender closed"));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
