//! Bounded buffering, eviction and flush engine

use super::{handle, Appender, AppenderHandle, AppenderRegistry};
use crate::core::{Diagnostics, EngineMetrics, LogEvent, LogLevel, PipelineError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Decides, per incoming event, whether buffered contents must flush now
///
/// Evaluated after the incoming event has been buffered, over (event,
/// current buffer contents).
pub type TriggerPredicate = Arc<dyn Fn(&LogEvent, &[Arc<LogEvent>]) -> bool + Send + Sync>;

struct BufferState {
    buffer: VecDeque<Arc<LogEvent>>,
    closed: bool,
}

/// Accumulates events and drives the attachment registry
///
/// One mutex guards the buffer; it is held for the whole of any
/// append/evict/flush step, so concurrent appends never corrupt arrival
/// order and a flush always delivers a consistent snapshot.
///
/// Eviction policy:
/// - non-lossy: an append finding the buffer at capacity first flushes
///   everything oldest-first, then buffers the new event — nothing is
///   silently dropped;
/// - lossy: the buffer behaves as a ring, discarding the oldest event to
///   make room; only a trigger, explicit flush or close delivers.
///
/// Capacity 0 delivers every event immediately.
pub struct BufferedDispatcher {
    capacity: usize,
    lossy: bool,
    trigger: Option<TriggerPredicate>,
    state: Mutex<BufferState>,
    registry: AppenderRegistry,
    metrics: Arc<EngineMetrics>,
    diagnostics: Arc<Diagnostics>,
}

impl BufferedDispatcher {
    #[must_use]
    pub fn builder() -> BufferedDispatcherBuilder {
        BufferedDispatcherBuilder::new()
    }

    /// Buffer an event, applying the eviction and trigger policy
    ///
    /// Fails fast with [`PipelineError::EngineClosed`] after `close()`.
    pub fn append(&self, event: impl Into<Arc<LogEvent>>) -> Result<()> {
        let event = event.into();
        let mut state = self.state.lock();

        if state.closed {
            return Err(PipelineError::EngineClosed);
        }

        if self.capacity == 0 {
            // Degenerate configuration: flush every event immediately
            self.metrics.record_flush();
            self.deliver(&event);
            return Ok(());
        }

        if state.buffer.len() >= self.capacity {
            if self.lossy {
                state.buffer.pop_front();
                self.metrics.record_discarded();
            } else {
                self.flush_locked(&mut state);
            }
        }
        state.buffer.push_back(Arc::clone(&event));

        if let Some(trigger) = &self.trigger {
            if trigger(&event, state.buffer.make_contiguous()) {
                self.flush_locked(&mut state);
            }
        }

        Ok(())
    }

    /// Deliver everything buffered, in arrival order
    ///
    /// A no-op on an empty buffer or after close.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        self.flush_locked(&mut state);
        Ok(())
    }

    /// Flush remaining events, then close every attached appender
    ///
    /// Idempotent: a second call is a no-op, not an error.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        self.flush_locked(&mut state);
        state.closed = true;
        self.registry.close_all(&self.diagnostics);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of currently buffered events
    pub fn buffered_len(&self) -> usize {
        self.state.lock().buffer.len()
    }

    /// The attachment registry this engine dispatches through
    pub fn registry(&self) -> &AppenderRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn flush_locked(&self, state: &mut BufferState) {
        if state.buffer.is_empty() {
            return;
        }
        self.metrics.record_flush();
        let drained: Vec<Arc<LogEvent>> = state.buffer.drain(..).collect();
        for event in drained {
            self.deliver(&event);
        }
    }

    fn deliver(&self, event: &LogEvent) {
        let failures = self.registry.dispatch(event, &self.diagnostics);
        for _ in 0..failures {
            self.metrics.record_sink_failure();
        }
        self.metrics.record_delivered();
    }
}

impl Drop for BufferedDispatcher {
    fn drop(&mut self) {
        // Best-effort delivery of anything still buffered
        let _ = self.close();
    }
}

impl std::fmt::Debug for BufferedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedDispatcher")
            .field("capacity", &self.capacity)
            .field("lossy", &self.lossy)
            .field("buffered", &self.buffered_len())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Builder for [`BufferedDispatcher`]
///
/// # Example
///
/// ```
/// use log_pipeline::appenders::MemoryAppender;
/// use log_pipeline::dispatch::BufferedDispatcher;
/// use log_pipeline::LogLevel;
///
/// let engine = BufferedDispatcher::builder()
///     .capacity(64)
///     .lossy(true)
///     .trigger_at_level(LogLevel::Error)
///     .appender(MemoryAppender::new("memory"))
///     .build();
/// ```
pub struct BufferedDispatcherBuilder {
    capacity: usize,
    lossy: bool,
    trigger: Option<TriggerPredicate>,
    diagnostics: Option<Arc<Diagnostics>>,
    appenders: Vec<AppenderHandle>,
}

impl BufferedDispatcherBuilder {
    pub fn new() -> Self {
        Self {
            capacity: 128,
            lossy: false,
            trigger: None,
            diagnostics: None,
            appenders: Vec::new(),
        }
    }

    /// Buffer capacity; 0 flushes every event immediately
    #[must_use = "builder methods return a new value"]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Lossy mode: ring-buffer overwrite instead of capacity flush
    #[must_use = "builder methods return a new value"]
    pub fn lossy(mut self, lossy: bool) -> Self {
        self.lossy = lossy;
        self
    }

    /// Custom trigger predicate over (incoming event, buffer contents)
    #[must_use = "builder methods return a new value"]
    pub fn trigger<F>(mut self, trigger: F) -> Self
    where
        F: Fn(&LogEvent, &[Arc<LogEvent>]) -> bool + Send + Sync + 'static,
    {
        self.trigger = Some(Arc::new(trigger));
        self
    }

    /// Flush whenever an event at or above `level` arrives
    #[must_use = "builder methods return a new value"]
    pub fn trigger_at_level(self, level: LogLevel) -> Self {
        self.trigger(move |event, _| event.level >= level)
    }

    /// Route diagnostics through an existing channel
    #[must_use = "builder methods return a new value"]
    pub fn diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Attach an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.attach(handle(appender))
    }

    /// Attach an existing appender handle
    #[must_use = "builder methods return a new value"]
    pub fn attach(mut self, handle: AppenderHandle) -> Self {
        self.appenders.push(handle);
        self
    }

    pub fn build(self) -> BufferedDispatcher {
        let engine = BufferedDispatcher {
            capacity: self.capacity,
            lossy: self.lossy,
            trigger: self.trigger,
            state: Mutex::new(BufferState {
                buffer: VecDeque::new(),
                closed: false,
            }),
            registry: AppenderRegistry::new(),
            metrics: Arc::new(EngineMetrics::new()),
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(Diagnostics::new())),
        };
        for appender in self.appenders {
            engine.registry.add(appender);
        }
        engine
    }
}

impl Default for BufferedDispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
