//! Console appender

use crate::core::{LogEvent, LogLevel, Result};
use crate::dispatch::Appender;
use crate::pattern::CompiledPattern;
use colored::Colorize;
use std::sync::Arc;

const DEFAULT_PATTERN: &str = "[%date] [%-5level] %thread - %message";

/// Writes pattern-formatted lines to stdout, routing Error and Fatal to
/// stderr
pub struct ConsoleAppender {
    use_colors: bool,
    layout: Arc<CompiledPattern>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            layout: Arc::new(CompiledPattern::compile_default(DEFAULT_PATTERN)),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the pattern layout for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use log_pipeline::appenders::ConsoleAppender;
    /// use log_pipeline::pattern::CompiledPattern;
    /// use std::sync::Arc;
    ///
    /// let layout = Arc::new(CompiledPattern::compile_default("%level %message%n"));
    /// let appender = ConsoleAppender::new().with_layout(layout);
    /// ```
    #[must_use]
    pub fn with_layout(mut self, layout: Arc<CompiledPattern>) -> Self {
        self.layout = layout;
        self
    }

    fn format(&self, event: &LogEvent) -> String {
        let line = self.layout.render(event);
        if self.use_colors {
            line.color(event.level.color_code()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        let output = self.format(event);

        // Route Error and Fatal levels to stderr, others to stdout
        match event.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
