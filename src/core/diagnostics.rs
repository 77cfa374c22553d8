//! Diagnostics channel for absorbed internal conditions
//!
//! Compile errors, isolated sink failures and other expected conditions
//! are reported here instead of propagating to the logging caller. The
//! default handler writes to stderr; a custom handler can forward reports
//! anywhere.

use super::error::PipelineError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Handler invoked for every reported condition
pub type DiagnosticHandler = Arc<dyn Fn(&PipelineError) + Send + Sync>;

/// Sink for internal error reports
///
/// Cheap to share: components hold an `Arc<Diagnostics>` and report
/// through it without coordination.
pub struct Diagnostics {
    handler: DiagnosticHandler,
    reported: AtomicU64,
}

impl Diagnostics {
    /// Create a diagnostics channel with the default stderr handler
    pub fn new() -> Self {
        Self::with_handler(Arc::new(|err| {
            eprintln!("[PIPELINE ERROR] {}", err);
        }))
    }

    /// Create a diagnostics channel with a custom handler
    pub fn with_handler(handler: DiagnosticHandler) -> Self {
        Self {
            handler,
            reported: AtomicU64::new(0),
        }
    }

    /// Create a diagnostics channel that swallows reports
    ///
    /// Reports still count; useful in tests asserting on error volume.
    pub fn silent() -> Self {
        Self::with_handler(Arc::new(|_| {}))
    }

    /// Report an internal condition
    pub fn report(&self, err: &PipelineError) {
        self.reported.fetch_add(1, Ordering::Relaxed);
        (self.handler)(err);
    }

    /// Total number of reported conditions
    pub fn reported_count(&self) -> u64 {
        self.reported.load(Ordering::Relaxed)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("reported", &self.reported_count())
            .finish()
    }
}
