//! Severity-based filters

use super::{Filter, FilterDecision};
use crate::core::{LogEvent, LogLevel};

/// Denies events outside an inclusive severity range
///
/// Inside the range the filter returns Accept when `accept_on_match` is
/// true (short-circuiting the rest of the chain), Neutral otherwise.
#[derive(Debug, Clone)]
pub struct LevelRangeFilter {
    min: Option<LogLevel>,
    max: Option<LogLevel>,
    accept_on_match: bool,
}

impl LevelRangeFilter {
    pub fn new(min: Option<LogLevel>, max: Option<LogLevel>) -> Self {
        Self {
            min,
            max,
            accept_on_match: false,
        }
    }

    /// At-least convenience: deny everything below `min`
    pub fn at_least(min: LogLevel) -> Self {
        Self::new(Some(min), None)
    }

    #[must_use]
    pub fn accept_on_match(mut self, accept: bool) -> Self {
        self.accept_on_match = accept;
        self
    }
}

impl Filter for LevelRangeFilter {
    fn decide(&self, event: &LogEvent) -> FilterDecision {
        if let Some(min) = self.min {
            if event.level < min {
                return FilterDecision::Deny;
            }
        }
        if let Some(max) = self.max {
            if event.level > max {
                return FilterDecision::Deny;
            }
        }
        if self.accept_on_match {
            FilterDecision::Accept
        } else {
            FilterDecision::Neutral
        }
    }
}

/// Matches one exact severity
///
/// A match maps to Accept or Deny per the polarity flag; any other level
/// stays Neutral.
#[derive(Debug, Clone)]
pub struct LevelMatchFilter {
    level: LogLevel,
    accept_on_match: bool,
}

impl LevelMatchFilter {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            accept_on_match: true,
        }
    }

    #[must_use]
    pub fn accept_on_match(mut self, accept: bool) -> Self {
        self.accept_on_match = accept;
        self
    }
}

impl Filter for LevelMatchFilter {
    fn decide(&self, event: &LogEvent) -> FilterDecision {
        if event.level != self.level {
            return FilterDecision::Neutral;
        }
        if self.accept_on_match {
            FilterDecision::Accept
        } else {
            FilterDecision::Deny
        }
    }
}
