//! Keyword registry for pattern compilation
//!
//! Two tiers: a process-wide default table of builtin converters
//! (initialized once, read-only) overlaid by per-instance overrides.
//! Overrides win on name conflicts. Keywords resolve longest-first so an
//! overlapping short form ("d") never shadows a longer one ("date").

use super::converters;
use super::Converter;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory producing a converter from an optional `{option}` block
pub type ConverterFactory = Arc<dyn Fn(Option<&str>) -> Box<dyn Converter> + Send + Sync>;

lazy_static! {
    static ref DEFAULT_FACTORIES: HashMap<String, ConverterFactory> =
        converters::builtin_factories();
}

/// Keywords available in the process-wide default table
pub fn default_registry_keywords() -> Vec<&'static str> {
    let mut keywords: Vec<&'static str> =
        DEFAULT_FACTORIES.keys().map(|k| k.as_str()).collect();
    keywords.sort_unstable();
    keywords
}

/// Name-to-factory registry consulted during compilation
///
/// Immutable once compilation starts; the parser only reads it.
#[derive(Default)]
pub struct ConverterRegistry {
    overrides: HashMap<String, ConverterFactory>,
}

impl ConverterRegistry {
    /// Create a registry resolving against the default table only
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Register an override factory, shadowing any default of the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(Option<&str>) -> Box<dyn Converter> + Send + Sync + 'static,
    {
        self.overrides.insert(name.into(), Arc::new(factory));
    }

    /// Look a keyword up, override first
    pub fn lookup(&self, name: &str) -> Option<ConverterFactory> {
        self.overrides
            .get(name)
            .or_else(|| DEFAULT_FACTORIES.get(name))
            .map(Arc::clone)
    }

    /// Find the longest registered keyword that prefixes `input`
    pub fn longest_match(&self, input: &str) -> Option<(String, ConverterFactory)> {
        let best = self
            .overrides
            .keys()
            .chain(DEFAULT_FACTORIES.keys())
            .filter(|name| input.starts_with(name.as_str()))
            .max_by_key(|name| name.len())?
            .clone();
        let factory = self.lookup(&best)?;
        Some((best, factory))
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.overrides.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("ConverterRegistry")
            .field("overrides", &names)
            .finish()
    }
}
