//! Immutable log event snapshot

use super::context::EventContext;
use super::error::Result;
use super::log_level::LogLevel;
use crate::render::{LoggedError, RenderMap, Renderable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::sync::Arc;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache.as_ref().expect("thread_id cache initialized in previous line").clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache.as_ref().expect("thread_name cache initialized in previous line").clone()
    })
}

/// Immutable snapshot of one logging call
///
/// Created once per log call and shared by reference (`Arc`) across every
/// consumer: filters, converters, the buffering engine and appenders all
/// read the same snapshot, never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    #[serde(skip_serializing_if = "EventContext::is_empty", default)]
    pub context: EventContext,
    #[serde(skip)]
    pub error: Option<Arc<LoggedError>>,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            context: EventContext::new(),
            error: None,
        }
    }

    /// Create an event whose message is an arbitrary value, rendered through
    /// the given render map at construction time
    pub fn rendered(level: LogLevel, value: &dyn Renderable, map: &RenderMap) -> Self {
        let mut message = String::new();
        map.render(value, &mut message);
        Self::new(level, message)
    }

    pub fn with_context(mut self, context: EventContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<super::context::FieldValue>,
    ) -> Self {
        self.context.set(key, value);
        self
    }

    pub fn with_error(mut self, error: LoggedError) -> Self {
        self.error = Some(Arc::new(error));
        self
    }

    /// Wrap the event for sharing across filters, buffer and appenders
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Serialize the event as a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
