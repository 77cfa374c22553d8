//! Error types for the pipeline core

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Pattern compile error (unknown keyword, unterminated option block)
    ///
    /// Non-fatal: reported to the diagnostics channel, compilation continues
    /// and the offending token contributes no node.
    #[error("Pattern error at position {position}: {message}")]
    Pattern { position: usize, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Append after close
    #[error("Dispatch engine already closed")]
    EngineClosed,

    /// Delivery failure at a single appender
    ///
    /// Isolated during dispatch: reported, never propagated to the
    /// engine's caller, never blocks delivery to other appenders.
    #[error("Appender '{appender}' failed: {message}")]
    Sink { appender: String, message: String },

    /// An appender panicked during append or close
    #[error("Appender '{appender}' panicked: {message}")]
    SinkPanic { appender: String, message: String },

    /// IO error surfaced by an appender
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create a pattern compile error
    pub fn pattern(position: usize, message: impl Into<String>) -> Self {
        PipelineError::Pattern {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink delivery error
    pub fn sink(appender: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Sink {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create a sink panic error
    pub fn sink_panic(appender: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SinkPanic {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PipelineError::pattern(12, "unknown keyword 'zzz'");
        assert!(matches!(err, PipelineError::Pattern { .. }));

        let err = PipelineError::config("ContextValueFilter", "invalid regex");
        assert!(matches!(err, PipelineError::InvalidConfiguration { .. }));

        let err = PipelineError::sink("console", "stream closed");
        assert!(matches!(err, PipelineError::Sink { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PipelineError::pattern(5, "unterminated option block");
        assert_eq!(
            err.to_string(),
            "Pattern error at position 5: unterminated option block"
        );

        let err = PipelineError::sink("memory", "buffer poisoned");
        assert_eq!(err.to_string(), "Appender 'memory' failed: buffer poisoned");

        assert_eq!(
            PipelineError::EngineClosed.to_string(),
            "Dispatch engine already closed"
        );
    }
}
