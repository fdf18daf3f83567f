//! Construction of typed knobs from persisted type tags.
//!
//! The registry replaces per-type dispatch in the loader: each known kind
//! registers a builder at startup, and loading a document only ever asks the
//! registry. New kinds are added by registering a builder, not by editing
//! the load path.

use std::collections::HashMap;

use crate::graph::Knob;
use crate::types::KnobKind;

/// Builds an empty knob of a fixed kind with the requested dimensionality.
pub type KnobBuilder = Box<dyn Fn(usize) -> Knob + Send + Sync>;

/// Registry of knob builders keyed by kind.
pub struct KnobFactory {
    builders: HashMap<KnobKind, KnobBuilder>,
}

impl KnobFactory {
    /// Creates a factory with every built-in knob kind registered.
    pub fn new() -> KnobFactory {
        let mut factory = KnobFactory::empty();
        let uniform = [
            KnobKind::Int,
            KnobKind::Bool,
            KnobKind::Double,
            KnobKind::Choice,
            KnobKind::Color,
            KnobKind::String,
            KnobKind::File,
            KnobKind::OutputFile,
            KnobKind::Path,
            KnobKind::Layers,
            KnobKind::Parametric,
            KnobKind::Group,
            KnobKind::Page,
        ];
        for kind in uniform {
            factory.register(kind, move |dimension| Knob::new(kind, dimension));
        }
        // Buttons and separators hold no document state of their own.
        for kind in [KnobKind::Button, KnobKind::Separator] {
            factory.register(kind, move |dimension| {
                let mut knob = Knob::new(kind, dimension);
                knob.set_persistent(false);
                knob
            });
        }
        factory
    }

    /// Creates a factory with no registered builders.
    pub fn empty() -> KnobFactory {
        KnobFactory {
            builders: HashMap::new(),
        }
    }

    /// Registers (or replaces) the builder for `kind`.
    pub fn register<F>(&mut self, kind: KnobKind, builder: F)
    where
        F: Fn(usize) -> Knob + Send + Sync + 'static,
    {
        self.builders.insert(kind, Box::new(builder));
    }

    /// Builds an unattached, unnamed knob from a persisted type tag.
    ///
    /// Returns `None` when the tag is outside the known set or no builder is
    /// registered for it. Callers treat that as "unsupported parameter
    /// type": skip rebuilding this knob and keep loading the rest of the
    /// document.
    pub fn create(&self, type_tag: &str, dimension: usize) -> Option<Knob> {
        let kind = KnobKind::from_str(type_tag)?;
        let builder = self.builders.get(&kind)?;
        Some(builder(dimension))
    }
}

impl Default for KnobFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a knob from a persisted type tag using the default registry.
pub fn create_knob(type_tag: &str, dimension: usize) -> Option<Knob> {
    KnobFactory::new().create(type_tag, dimension)
}
