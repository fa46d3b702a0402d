//! Component registry for resolving node type names to implementations.

use crate::icons::{IconCatalog, IconGlyph};
use crate::primitives::{CustomPrimitive, Primitive};
use indexmap::IndexMap;
use std::sync::Arc;

/// A renderable implementation registered under a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Implementation {
    Primitive(Primitive),
    Custom(Arc<CustomPrimitive>),
    Icon(Arc<IconGlyph>),
}

impl Implementation {
    pub fn name(&self) -> &str {
        match self {
            Implementation::Primitive(primitive) => primitive.name(),
            Implementation::Custom(custom) => &custom.name,
            Implementation::Icon(glyph) => &glyph.name,
        }
    }

    /// Short label of the namespace the implementation came from.
    pub fn kind(&self) -> &'static str {
        match self {
            Implementation::Primitive(_) => "primitive",
            Implementation::Custom(_) => "custom",
            Implementation::Icon(_) => "icon",
        }
    }
}

/// Outcome of resolving a type name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Known(Implementation),
    /// No registry entry matched; the name is used literally as a tag.
    Passthrough(String),
}

impl Resolved {
    /// The identity of the resolved implementation. For passthrough this is the
    /// literal type name.
    pub fn name(&self) -> &str {
        match self {
            Resolved::Known(implementation) => implementation.name(),
            Resolved::Passthrough(name) => name,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Resolved::Passthrough(_))
    }
}

/// A flat, immutable mapping from type names to implementations.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: IndexMap<String, Implementation>,
}

impl ComponentRegistry {
    /// Create an empty registry. Every name resolves to passthrough.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start assembling a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Built-in primitives merged with the built-in icon catalog.
    pub fn builtin() -> Self {
        Self::builder()
            .builtin_primitives()
            .icons(&IconCatalog::builtin())
            .build()
    }

    /// Resolve a type name. Never fails: unknown names resolve to passthrough.
    pub fn resolve(&self, name: &str) -> Resolved {
        match self.entries.get(name) {
            Some(implementation) => Resolved::Known(implementation.clone()),
            None => Resolved::Passthrough(name.to_string()),
        }
    }

    /// Get an implementation by name.
    pub fn get(&self, name: &str) -> Option<&Implementation> {
        self.entries.get(name)
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get all registered names in order of first registration. A shadowed name keeps
    /// the position of the entry it replaced.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Implementation)> {
        self.entries.iter().map(|(name, imp)| (name.as_str(), imp))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merges namespaces into a registry. A later registration under an existing name
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: IndexMap<String, Implementation>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitive(mut self, primitive: Primitive) -> Self {
        self.insert(primitive.name().to_string(), Implementation::Primitive(primitive));
        self
    }

    pub fn builtin_primitives(self) -> Self {
        Primitive::ALL.into_iter().fold(self, Self::primitive)
    }

    pub fn custom(mut self, custom: CustomPrimitive) -> Self {
        self.insert(custom.name.clone(), Implementation::Custom(Arc::new(custom)));
        self
    }

    pub fn icon(mut self, glyph: IconGlyph) -> Self {
        self.insert(glyph.name.clone(), Implementation::Icon(Arc::new(glyph)));
        self
    }

    /// Merge a whole icon catalog.
    pub fn icons(mut self, catalog: &IconCatalog) -> Self {
        for glyph in catalog.iter() {
            self.insert(glyph.name.clone(), Implementation::Icon(Arc::clone(glyph)));
        }
        self
    }

    fn insert(&mut self, name: String, implementation: Implementation) {
        if let Some(previous) = self.entries.get(&name) {
            tracing::debug!(
                name = %name,
                replaced = previous.kind(),
                by = implementation.kind(),
                "registry entry shadowed"
            );
        }
        self.entries.insert(name, implementation);
    }

    /// Finish assembly. The registry cannot be modified afterwards.
    pub fn build(self) -> ComponentRegistry {
        tracing::debug!(entries = self.entries.len(), "component registry built");
        ComponentRegistry {
            entries: self.entries,
        }
    }
}

/// Whether `name` can be emitted verbatim as an element tag.
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}
