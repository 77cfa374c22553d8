//! Pattern layouts: compiler and rendering executor
//!
//! A pattern string like `"[%date] [%-5level] %message%n"` compiles against
//! a keyword registry into an ordered sequence of format nodes. Compiled
//! patterns are immutable and safely rendered by many threads at once.

pub mod converters;
mod parse;
pub mod registry;

pub use registry::{default_registry_keywords, ConverterFactory, ConverterRegistry};

use crate::core::{Diagnostics, LogEvent};
use std::fmt;

/// Keyword-specific rendering logic behind a converter node
pub trait Converter: Send + Sync {
    fn render(&self, event: &LogEvent, out: &mut String);
}

/// Width constraints applied to a converter's raw output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub left_align: bool,
}

impl FormatSpec {
    /// True when no width handling is needed
    pub fn is_plain(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Apply truncation and padding to raw converter output
    ///
    /// Over `max`, the trailing `max` characters are kept; under `min`,
    /// spaces pad the right side when left-aligned, the left otherwise.
    /// Counts are in characters so multi-byte text never splits.
    pub fn apply(&self, raw: &str) -> String {
        let len = raw.chars().count();

        if let Some(max) = self.max {
            if len > max {
                return raw.chars().skip(len - max).collect();
            }
        }

        if let Some(min) = self.min {
            if len < min {
                let pad = " ".repeat(min - len);
                return if self.left_align {
                    format!("{}{}", raw, pad)
                } else {
                    format!("{}{}", pad, raw)
                };
            }
        }

        raw.to_string()
    }
}

/// One element of a compiled pattern
pub enum FormatNode {
    Literal(String),
    Converter {
        keyword: String,
        spec: FormatSpec,
        converter: Box<dyn Converter>,
    },
}

impl fmt::Debug for FormatNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatNode::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            FormatNode::Converter { keyword, spec, .. } => f
                .debug_struct("Converter")
                .field("keyword", keyword)
                .field("spec", spec)
                .finish(),
        }
    }
}

/// Immutable compiled pattern
///
/// Compilation is a pure function of (pattern, registry): identical inputs
/// always yield an equivalent node sequence. Compile errors are non-fatal
/// and reported to the diagnostics channel; offending tokens contribute no
/// node.
pub struct CompiledPattern {
    pattern: String,
    nodes: Vec<FormatNode>,
}

impl CompiledPattern {
    /// Compile against an explicit registry, reporting errors to
    /// `diagnostics`
    pub fn compile(pattern: &str, registry: &ConverterRegistry, diagnostics: &Diagnostics) -> Self {
        let (nodes, errors) = parse::parse(pattern, registry);
        for err in &errors {
            diagnostics.report(err);
        }
        Self {
            pattern: pattern.to_string(),
            nodes,
        }
    }

    /// Compile against the process-wide default registry with stderr
    /// diagnostics
    pub fn compile_default(pattern: &str) -> Self {
        Self::compile(pattern, &ConverterRegistry::new(), &Diagnostics::new())
    }

    /// Render an event through every node in sequence
    pub fn render(&self, event: &LogEvent) -> String {
        let mut out = String::new();
        self.render_to(event, &mut out);
        out
    }

    /// Render an event, appending to `out`
    pub fn render_to(&self, event: &LogEvent, out: &mut String) {
        for node in &self.nodes {
            match node {
                FormatNode::Literal(text) => out.push_str(text),
                FormatNode::Converter {
                    spec, converter, ..
                } => {
                    if spec.is_plain() {
                        converter.render(event, out);
                    } else {
                        let mut raw = String::new();
                        converter.render(event, &mut raw);
                        out.push_str(&spec.apply(&raw));
                    }
                }
            }
        }
    }

    pub fn nodes(&self) -> &[FormatNode] {
        &self.nodes
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPattern")
            .field("pattern", &self.pattern)
            .field("nodes", &self.nodes)
            .finish()
    }
}
