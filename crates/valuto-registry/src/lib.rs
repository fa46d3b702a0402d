//! Component registry for the Valuto renderer.
//!
//! This crate handles:
//! - Built-in semantic primitives and their typed props
//! - The icon catalog
//! - Merging both namespaces into one flat, immutable registry
//! - Resolving type names, falling back to passthrough
//! - Loading host-supplied registry manifests

mod icons;
mod manifest;
mod primitives;
mod registry;

pub use icons::{IconCatalog, IconGlyph, DEFAULT_VIEW_BOX};
pub use manifest::{IconSpec, RegistryManifest};
pub use primitives::{
    AlertVariant, BadgeVariant, ButtonSize, ButtonVariant, CustomPrimitive, Orientation,
    Primitive, PrimitiveConfig, PropError,
};
pub use registry::{is_valid_tag_name, ComponentRegistry, Implementation, RegistryBuilder, Resolved};
