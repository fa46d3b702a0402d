//! Icon glyphs and the icon catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// View box shared by the stroke icons in the built-in catalog.
pub const DEFAULT_VIEW_BOX: &str = "0 0 24 24";

/// A single icon: inner SVG markup drawn inside a view box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconGlyph {
    pub name: String,
    pub view_box: String,
    /// Trusted SVG markup placed inside the `<svg>` element.
    pub body: String,
}

impl IconGlyph {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            view_box: DEFAULT_VIEW_BOX.to_string(),
            body: body.into(),
        }
    }

    /// CSS class identifying the glyph, e.g. `icon-check-circle` for `CheckCircle`.
    pub fn class_name(&self) -> String {
        format!("icon icon-{}", kebab_case(&self.name))
    }
}

/// A catalog of named icon glyphs, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    glyphs: IndexMap<String, Arc<IconGlyph>>,
}

impl IconCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The glyphs used throughout the finance lessons.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, body) in BUILTIN_GLYPHS {
            catalog.insert(IconGlyph::new(*name, *body));
        }
        catalog
    }

    /// Add a glyph, replacing any glyph of the same name.
    pub fn insert(&mut self, glyph: IconGlyph) {
        self.glyphs.insert(glyph.name.clone(), Arc::new(glyph));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<IconGlyph>> {
        self.glyphs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<IconGlyph>> {
        self.glyphs.values()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower_or_digit {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

const BUILTIN_GLYPHS: &[(&str, &str)] = &[
    (
        "CheckCircle",
        r#"<path d="M22 11.08V12a10 10 0 1 1-5.93-9.14"/><polyline points="22 4 12 14.01 9 11.01"/>"#,
    ),
    (
        "XCircle",
        r#"<circle cx="12" cy="12" r="10"/><path d="m15 9-6 6"/><path d="m9 9 6 6"/>"#,
    ),
    (
        "Info",
        r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/>"#,
    ),
    (
        "AlertTriangle",
        r#"<path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#,
    ),
    (
        "Lightbulb",
        r#"<path d="M15 14c.2-1 .7-1.7 1.5-2.5 1-.9 1.5-2.2 1.5-3.5A6 6 0 0 0 6 8c0 1 .2 2.2 1.5 3.5.7.7 1.3 1.5 1.5 2.5"/><path d="M9 18h6"/><path d="M10 22h4"/>"#,
    ),
    (
        "DollarSign",
        r#"<line x1="12" x2="12" y1="2" y2="22"/><path d="M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6"/>"#,
    ),
    (
        "TrendingUp",
        r#"<polyline points="22 7 13.5 15.5 8.5 10.5 2 17"/><polyline points="16 7 22 7 22 13"/>"#,
    ),
    (
        "TrendingDown",
        r#"<polyline points="22 17 13.5 8.5 8.5 13.5 2 7"/><polyline points="16 17 22 17 22 11"/>"#,
    ),
    (
        "CreditCard",
        r#"<rect width="20" height="14" x="2" y="5" rx="2"/><line x1="2" x2="22" y1="10" y2="10"/>"#,
    ),
    (
        "Wallet",
        r#"<path d="M21 12V7H5a2 2 0 0 1 0-4h14v4"/><path d="M3 5v14a2 2 0 0 0 2 2h16v-5"/><path d="M18 12a2 2 0 0 0 0 4h4v-4Z"/>"#,
    ),
    (
        "Target",
        r#"<circle cx="12" cy="12" r="10"/><circle cx="12" cy="12" r="6"/><circle cx="12" cy="12" r="2"/>"#,
    ),
    (
        "BookOpen",
        r#"<path d="M2 3h6a4 4 0 0 1 4 4v14a3 3 0 0 0-3-3H2z"/><path d="M22 3h-6a4 4 0 0 0-4 4v14a3 3 0 0 1 3-3h7z"/>"#,
    ),
    (
        "ArrowRight",
        r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#,
    ),
];
