//! Error carrier and recursive exception rendering

use super::{RenderMap, Renderable, Renderer};
use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

/// Causal chains deeper than this render as an elision marker. The depth
/// guard also breaks accidental cycles between error values.
const MAX_CAUSE_DEPTH: usize = 16;

thread_local! {
    static CAUSE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Error view consumed by the exception-aware renderer
///
/// Any type exposing this view (via [`Renderable::as_error`]) renders as
/// type name, message, ordered context entries, and the recursively
/// rendered cause.
pub trait ErrorDetails: Send + Sync {
    fn type_name(&self) -> &str;

    fn message(&self) -> &str;

    /// Extended key/value context in insertion order
    fn entries(&self) -> &[(String, Box<dyn Renderable>)];

    /// Inner/causal error, rendered through the same map
    fn cause(&self) -> Option<&dyn Renderable>;
}

/// Concrete error carrier attached to log events
///
/// # Example
///
/// ```
/// use log_pipeline::LoggedError;
///
/// let err = LoggedError::new("DbError", "insert failed")
///     .with_entry("table", "orders")
///     .caused_by(LoggedError::new("IoError", "connection reset"));
/// assert_eq!(err.type_name(), "DbError");
/// ```
pub struct LoggedError {
    type_name: String,
    message: String,
    entries: Vec<(String, Box<dyn Renderable>)>,
    cause: Option<Box<LoggedError>>,
}

impl LoggedError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            entries: Vec::new(),
            cause: None,
        }
    }

    /// Capture a std error and its `source()` chain as a cause chain
    pub fn from_std_error<E>(err: &E) -> Self
    where
        E: std::error::Error,
    {
        let mut root = LoggedError::new(std::any::type_name::<E>(), err.to_string());
        if let Some(source) = err.source() {
            root.cause = Some(Box::new(Self::from_dyn_source(source)));
        }
        root
    }

    fn from_dyn_source(err: &dyn std::error::Error) -> Self {
        // Concrete type names are unavailable behind `dyn Error`
        let mut node = LoggedError::new("Error", err.to_string());
        if let Some(source) = err.source() {
            node.cause = Some(Box::new(Self::from_dyn_source(source)));
        }
        node
    }

    /// Append an extended context entry (insertion order preserved)
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Renderable + 'static) -> Self {
        self.entries.push((key.into(), Box::new(value)));
        self
    }

    /// Attach a causal error
    pub fn caused_by(mut self, cause: LoggedError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause_ref(&self) -> Option<&LoggedError> {
        self.cause.as_deref()
    }
}

impl ErrorDetails for LoggedError {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn entries(&self) -> &[(String, Box<dyn Renderable>)] {
        &self.entries
    }

    fn cause(&self) -> Option<&dyn Renderable> {
        self.cause.as_deref().map(|c| c as &dyn Renderable)
    }
}

impl Renderable for LoggedError {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn base_text(&self) -> String {
        format!("{}: {}", self.type_name, self.message)
    }

    fn as_error(&self) -> Option<&dyn ErrorDetails> {
        Some(self)
    }
}

impl fmt::Debug for LoggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggedError")
            .field("type_name", &self.type_name)
            .field("message", &self.message)
            .field("entries", &self.entries.len())
            .field("has_cause", &self.cause.is_some())
            .finish()
    }
}

/// The exception-aware renderer seeded into [`RenderMap::new`]
///
/// Registered for [`LoggedError`] and reached by any type whose lineage
/// declares it. Works through the [`ErrorDetails`] view rather than a
/// downcast so family resolution covers derived error types.
pub(crate) fn error_renderer() -> Renderer {
    Arc::new(|map, value, out| match value.as_error() {
        Some(err) => render_error_details(map, err, out),
        None => out.push_str(&value.base_text()),
    })
}

fn render_error_details(map: &RenderMap, err: &dyn ErrorDetails, out: &mut String) {
    out.push_str(err.type_name());
    out.push_str(": ");
    out.push_str(err.message());

    for (key, value) in err.entries() {
        out.push_str("; ");
        out.push_str(key);
        out.push('=');
        map.render(value.as_ref(), out);
    }

    if let Some(cause) = err.cause() {
        let depth = CAUSE_DEPTH.with(|d| d.get());
        if depth >= MAX_CAUSE_DEPTH {
            out.push_str("; caused by: ...");
            return;
        }
        CAUSE_DEPTH.with(|d| d.set(depth + 1));
        out.push_str("; caused by: ");
        map.render(cause, out);
        CAUSE_DEPTH.with(|d| d.set(depth));
    }
}
