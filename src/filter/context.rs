//! Ambient-context value filter

use super::{Filter, FilterDecision};
use crate::core::{LogEvent, PipelineError, Result};
use regex::Regex;

/// Filters on one ambient context key's value
///
/// A regex pattern, a literal substring, or both may be configured; the
/// regex takes precedence when both are set. A match maps to Accept when
/// `accept_on_match` is true (the default), Deny otherwise. The filter
/// stays Neutral when the key is unset, no criteria are configured, or
/// nothing matches.
///
/// The regex is compiled once at construction, never per event.
///
/// # Example
///
/// ```
/// use log_pipeline::{ContextValueFilter, Filter, FilterDecision, LogEvent, LogLevel};
///
/// let filter = ContextValueFilter::new("request_id")
///     .with_regex(r"^req-[0-9]+$")
///     .unwrap();
///
/// let event = LogEvent::new(LogLevel::Info, "hit").with_field("request_id", "req-42");
/// assert_eq!(filter.decide(&event), FilterDecision::Accept);
/// ```
pub struct ContextValueFilter {
    key: String,
    substring: Option<String>,
    pattern: Option<Regex>,
    accept_on_match: bool,
}

impl ContextValueFilter {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            substring: None,
            pattern: None,
            accept_on_match: true,
        }
    }

    /// Configure a literal substring criterion
    #[must_use]
    pub fn with_substring(mut self, substring: impl Into<String>) -> Self {
        self.substring = Some(substring.into());
        self
    }

    /// Configure a regex criterion, compiled here once
    pub fn with_regex(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(Regex::new(pattern).map_err(|e| {
            PipelineError::config("ContextValueFilter", format!("invalid regex: {}", e))
        })?);
        Ok(self)
    }

    /// Set the polarity: true maps a match to Accept, false to Deny
    #[must_use]
    pub fn accept_on_match(mut self, accept: bool) -> Self {
        self.accept_on_match = accept;
        self
    }

    fn on_match(&self) -> FilterDecision {
        if self.accept_on_match {
            FilterDecision::Accept
        } else {
            FilterDecision::Deny
        }
    }
}

impl Filter for ContextValueFilter {
    fn decide(&self, event: &LogEvent) -> FilterDecision {
        let Some(value) = event.context.get(&self.key) else {
            return FilterDecision::Neutral;
        };
        let value = value.to_string();

        if let Some(pattern) = &self.pattern {
            return if pattern.is_match(&value) {
                self.on_match()
            } else {
                FilterDecision::Neutral
            };
        }

        if let Some(substring) = &self.substring {
            return if value.contains(substring.as_str()) {
                self.on_match()
            } else {
                FilterDecision::Neutral
            };
        }

        // No criteria configured: the filter cannot decide
        FilterDecision::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    fn event_with(key: &str, value: &str) -> LogEvent {
        LogEvent::new(LogLevel::Info, "probe").with_field(key, value)
    }

    #[test]
    fn test_unset_key_is_neutral() {
        let filter = ContextValueFilter::new("user").with_substring("admin");
        let event = LogEvent::new(LogLevel::Info, "probe");
        assert_eq!(filter.decide(&event), FilterDecision::Neutral);
    }

    #[test]
    fn test_no_criteria_is_neutral() {
        let filter = ContextValueFilter::new("user");
        assert_eq!(
            filter.decide(&event_with("user", "admin")),
            FilterDecision::Neutral
        );
    }

    #[test]
    fn test_substring_match_accepts() {
        let filter = ContextValueFilter::new("user").with_substring("admin");
        assert_eq!(
            filter.decide(&event_with("user", "site-admin")),
            FilterDecision::Accept
        );
        assert_eq!(
            filter.decide(&event_with("user", "guest")),
            FilterDecision::Neutral
        );
    }

    #[test]
    fn test_polarity_flag_denies_on_match() {
        let filter = ContextValueFilter::new("user")
            .with_substring("bot")
            .accept_on_match(false);
        assert_eq!(
            filter.decide(&event_with("user", "crawler-bot")),
            FilterDecision::Deny
        );
    }

    #[test]
    fn test_regex_match() {
        let filter = ContextValueFilter::new("request_id")
            .with_regex(r"^req-[0-9]+$")
            .expect("valid regex");
        assert_eq!(
            filter.decide(&event_with("request_id", "req-42")),
            FilterDecision::Accept
        );
        assert_eq!(
            filter.decide(&event_with("request_id", "other")),
            FilterDecision::Neutral
        );
    }

    #[test]
    fn test_regex_takes_precedence_over_substring() {
        // Substring alone would match, but the regex decides
        let filter = ContextValueFilter::new("user")
            .with_substring("gue")
            .with_regex("^admin$")
            .expect("valid regex");
        assert_eq!(
            filter.decide(&event_with("user", "guest")),
            FilterDecision::Neutral
        );
        assert_eq!(
            filter.decide(&event_with("user", "admin")),
            FilterDecision::Accept
        );
    }

    #[test]
    fn test_invalid_regex_is_a_construction_error() {
        let result = ContextValueFilter::new("key").with_regex("(unclosed");
        assert!(matches!(
            result,
            Err(PipelineError::InvalidConfiguration { .. })
        ));
    }
}
