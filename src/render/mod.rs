//! Type-directed object rendering
//!
//! A [`RenderMap`] resolves a value's runtime type to a rendering function.
//! Resolution is total: an exact-type entry wins, then the first entry
//! matching the value's declared lineage, then the default renderer. Rust
//! has no runtime type reflection, so the interface walk and base-class walk
//! of classic logging frameworks collapse into one declared lineage sequence
//! on the [`Renderable`] trait.

pub mod error_info;

pub use error_info::{ErrorDetails, LoggedError};

use crate::core::context::{EventContext, FieldValue};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Rendering function stored in a [`RenderMap`]
///
/// Receives the map itself so renderers can recurse into embedded values.
pub type Renderer = Arc<dyn Fn(&RenderMap, &dyn Renderable, &mut String) + Send + Sync>;

/// A value the render map can turn into text
pub trait Renderable: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Standard textual representation, used by the default renderer
    fn base_text(&self) -> String;

    /// Declared type lineage in precedence order
    ///
    /// A renderer registered for any listed type renders this value when no
    /// exact-type entry exists. The empty default means only exact-type and
    /// default resolution apply.
    fn lineage(&self) -> Vec<TypeId> {
        Vec::new()
    }

    /// Error view of the value, if it carries error details
    fn as_error(&self) -> Option<&dyn ErrorDetails> {
        None
    }
}

macro_rules! impl_display_renderable {
    ($($ty:ty),* $(,)?) => {
        $(impl Renderable for $ty {
            fn as_any(&self) -> &dyn Any {
                self
            }

            fn base_text(&self) -> String {
                self.to_string()
            }
        })*
    };
}

impl_display_renderable!(String, &'static str, bool, char, i32, i64, u32, u64, usize, f32, f64);

impl Renderable for FieldValue {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn base_text(&self) -> String {
        self.to_string()
    }
}

impl Renderable for EventContext {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn base_text(&self) -> String {
        self.format_fields()
    }
}

/// Mapping from runtime type to rendering function
///
/// Entries are immutable once registration is complete; concurrent renders
/// require no lock. [`RenderMap::new`] seeds the exception-aware renderer
/// for [`LoggedError`]; [`RenderMap::empty`] starts with only the default.
pub struct RenderMap {
    entries: Vec<(TypeId, Renderer)>,
    fallback: Renderer,
}

impl RenderMap {
    /// Create a map with the exception-aware renderer pre-registered
    pub fn new() -> Self {
        let mut map = Self::empty();
        map.put_dyn(TypeId::of::<LoggedError>(), error_info::error_renderer());
        map
    }

    /// Create a map holding only the default renderer
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            fallback: Arc::new(|_, value, out| out.push_str(&value.base_text())),
        }
    }

    /// Register a renderer for the exact type `T`, overwriting any prior
    /// entry for that type
    pub fn put<T, F>(&mut self, render: F)
    where
        T: Any,
        F: Fn(&RenderMap, &T, &mut String) + Send + Sync + 'static,
    {
        let renderer: Renderer = Arc::new(move |map, value, out| {
            match value.as_any().downcast_ref::<T>() {
                Some(v) => render(map, v, out),
                None => out.push_str(&value.base_text()),
            }
        });
        self.put_dyn(TypeId::of::<T>(), renderer);
    }

    /// Register a type-erased renderer under an explicit type id
    ///
    /// Used for family registrations reached through lineage, where the
    /// renderer must work through a trait view rather than a downcast.
    pub fn put_dyn(&mut self, type_id: TypeId, renderer: Renderer) {
        match self.entries.iter_mut().find(|(t, _)| *t == type_id) {
            Some(entry) => entry.1 = renderer,
            None => self.entries.push((type_id, renderer)),
        }
    }

    /// Replace the default renderer
    pub fn set_fallback(&mut self, renderer: Renderer) {
        self.fallback = renderer;
    }

    /// Resolve the renderer for a value
    ///
    /// Never fails: exact type, then declared lineage, then the default.
    pub fn resolve(&self, value: &dyn Renderable) -> Renderer {
        let exact = value.as_any().type_id();
        if let Some((_, renderer)) = self.entries.iter().find(|(t, _)| *t == exact) {
            return Arc::clone(renderer);
        }
        for ancestor in value.lineage() {
            if let Some((_, renderer)) = self.entries.iter().find(|(t, _)| *t == ancestor) {
                return Arc::clone(renderer);
            }
        }
        Arc::clone(&self.fallback)
    }

    /// Render a value into `out`
    pub fn render(&self, value: &dyn Renderable, out: &mut String) {
        let renderer = self.resolve(value);
        renderer(self, value, out);
    }

    /// Render a value into a fresh string
    pub fn render_to_string(&self, value: &dyn Renderable) -> String {
        let mut out = String::new();
        self.render(value, &mut out);
        out
    }

    /// Number of registered exact-type entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RenderMap {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_RENDER_MAP: RenderMap = RenderMap::new();
}

/// Process-wide read-only render map used where no per-instance map is
/// configured (e.g. the `error` converter)
pub fn default_render_map() -> &'static RenderMap {
    &DEFAULT_RENDER_MAP
}

impl std::fmt::Debug for RenderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderMap")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Celsius(f64);

    impl Renderable for Celsius {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn base_text(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_default_renderer_is_total() {
        let map = RenderMap::empty();
        assert_eq!(map.render_to_string(&Celsius(21.5)), "21.5");
        assert_eq!(map.render_to_string(&"plain text"), "plain text");
    }

    #[test]
    fn test_exact_type_renderer() {
        let mut map = RenderMap::empty();
        map.put::<Celsius, _>(|_, v, out| {
            out.push_str(&format!("{:.1}°C", v.0));
        });

        assert_eq!(map.render_to_string(&Celsius(21.52)), "21.5°C");
        // Other types still hit the default
        assert_eq!(map.render_to_string(&42i64), "42");
    }

    #[test]
    fn test_put_overwrites_exact_entry() {
        let mut map = RenderMap::empty();
        map.put::<Celsius, _>(|_, v, out| out.push_str(&format!("v1:{}", v.0)));
        map.put::<Celsius, _>(|_, v, out| out.push_str(&format!("v2:{}", v.0)));

        assert_eq!(map.len(), 1);
        assert_eq!(map.render_to_string(&Celsius(3.0)), "v2:3");
    }

    struct Fahrenheit(f64);

    impl Renderable for Fahrenheit {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn base_text(&self) -> String {
            self.0.to_string()
        }

        fn lineage(&self) -> Vec<TypeId> {
            vec![TypeId::of::<Celsius>()]
        }
    }

    #[test]
    fn test_lineage_resolution() {
        let mut map = RenderMap::empty();
        map.put_dyn(
            TypeId::of::<Celsius>(),
            Arc::new(|_, v, out| {
                out.push_str("temp:");
                out.push_str(&v.base_text());
            }),
        );

        // Fahrenheit has no exact entry but declares Celsius in its lineage
        assert_eq!(map.render_to_string(&Fahrenheit(70.0)), "temp:70");
    }

    #[test]
    fn test_exact_beats_lineage() {
        let mut map = RenderMap::empty();
        map.put_dyn(
            TypeId::of::<Celsius>(),
            Arc::new(|_, v, out| {
                out.push_str("family:");
                out.push_str(&v.base_text());
            }),
        );
        map.put::<Fahrenheit, _>(|_, v, out| {
            out.push_str(&format!("{:.0}°F", v.0));
        });

        assert_eq!(map.render_to_string(&Fahrenheit(70.0)), "70°F");
    }

    #[test]
    fn test_renderer_can_recurse_through_map() {
        struct Pair(i64, i64);

        impl Renderable for Pair {
            fn as_any(&self) -> &dyn Any {
                self
            }

            fn base_text(&self) -> String {
                format!("({}, {})", self.0, self.1)
            }
        }

        let mut map = RenderMap::empty();
        map.put::<i64, _>(|_, v, out| out.push_str(&format!("#{}", v)));
        map.put::<Pair, _>(|map, v, out| {
            map.render(&v.0, out);
            out.push('/');
            map.render(&v.1, out);
        });

        assert_eq!(map.render_to_string(&Pair(1, 2)), "#1/#2");
    }
}
