//! Core event model, errors, diagnostics and metrics

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod timestamp;

pub use context::{EventContext, FieldValue};
pub use diagnostics::{DiagnosticHandler, Diagnostics};
pub use error::{PipelineError, Result};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use metrics::EngineMetrics;
pub use timestamp::TimestampFormat;
