//! Ternary filter-chain decision protocol
//!
//! Filters are evaluated in registration order; the first non-Neutral
//! decision wins. A chain where every filter stays Neutral (including the
//! empty chain) means the caller accepts the event by default.

pub mod context;
pub mod level;

pub use context::ContextValueFilter;
pub use level::{LevelMatchFilter, LevelRangeFilter};

use crate::core::LogEvent;

/// Per-filter decision about one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Deliver the event, skipping remaining filters
    Accept,
    /// Reject the event, skipping remaining filters
    Deny,
    /// This filter cannot decide; continue to the next
    Neutral,
}

/// A decision predicate over one event
///
/// Filters own their configuration; any derived state (such as a compiled
/// regex) is built once at construction and read per event without locking.
pub trait Filter: Send + Sync {
    fn decide(&self, event: &LogEvent) -> FilterDecision;
}

impl<F> Filter for F
where
    F: Fn(&LogEvent) -> FilterDecision + Send + Sync,
{
    fn decide(&self, event: &LogEvent) -> FilterDecision {
        self(event)
    }
}

/// Ordered sequence of filters sharing one event
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter; evaluation order is registration order
    pub fn add<F: Filter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    /// Builder-style [`FilterChain::add`]
    pub fn with<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.add(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluate the chain: first Accept or Deny wins, all-Neutral stays
    /// Neutral
    pub fn decide(&self, event: &LogEvent) -> FilterDecision {
        for filter in &self.filters {
            match filter.decide(event) {
                FilterDecision::Neutral => continue,
                decision => return decision,
            }
        }
        FilterDecision::Neutral
    }

    /// Fold the chain decision into the caller contract: Neutral means
    /// accept by default
    pub fn accepts(&self, event: &LogEvent) -> bool {
        self.decide(event) != FilterDecision::Deny
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}
