//! Host-supplied registry configuration.
//!
//! A manifest lists the extra containers and icons a hosting application makes available
//! to lesson content, and whether the built-in namespaces are included:
//!
//! ```json
//! {
//!   "includeBuiltinIcons": true,
//!   "primitives": [{ "name": "Callout", "tag": "aside", "class": "border-l-4 pl-4" }],
//!   "icons": { "Coin": { "body": "<circle cx=\"12\" cy=\"12\" r=\"8\"/>" } }
//! }
//! ```

use crate::icons::{IconCatalog, IconGlyph, DEFAULT_VIEW_BOX};
use crate::primitives::CustomPrimitive;
use crate::registry::{is_valid_tag_name, ComponentRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use valuto_core::ManifestError;

/// Registry configuration loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryManifest {
    #[serde(default = "default_true")]
    pub include_builtin_primitives: bool,
    #[serde(default = "default_true")]
    pub include_builtin_icons: bool,
    #[serde(default)]
    pub primitives: Vec<CustomPrimitive>,
    #[serde(default)]
    pub icons: IndexMap<String, IconSpec>,
}

/// An icon declared in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    #[serde(default)]
    pub view_box: Option<String>,
    pub body: String,
}

fn default_true() -> bool {
    true
}

impl Default for RegistryManifest {
    fn default() -> Self {
        Self {
            include_builtin_primitives: true,
            include_builtin_icons: true,
            primitives: Vec::new(),
            icons: IndexMap::new(),
        }
    }
}

impl RegistryManifest {
    /// Parse a manifest from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Assemble the registry this manifest describes.
    ///
    /// Merge order is built-in primitives, manifest primitives, built-in icons, manifest
    /// icons; later entries shadow earlier ones of the same name.
    pub fn into_registry(self) -> Result<ComponentRegistry, ManifestError> {
        let mut builder = ComponentRegistry::builder();
        if self.include_builtin_primitives {
            builder = builder.builtin_primitives();
        }

        for custom in self.primitives {
            if custom.name.is_empty() {
                return Err(ManifestError::EmptyName);
            }
            if !is_valid_tag_name(&custom.tag) {
                return Err(ManifestError::InvalidTag {
                    name: custom.name,
                    tag: custom.tag,
                });
            }
            builder = builder.custom(custom);
        }

        if self.include_builtin_icons {
            builder = builder.icons(&IconCatalog::builtin());
        }

        for (name, spec) in self.icons {
            if name.is_empty() {
                return Err(ManifestError::EmptyName);
            }
            builder = builder.icon(IconGlyph {
                name,
                view_box: spec.view_box.unwrap_or_else(|| DEFAULT_VIEW_BOX.to_string()),
                body: spec.body,
            });
        }

        Ok(builder.build())
    }
}
