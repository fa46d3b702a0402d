//! Error types for the Valuto renderer.

use crate::path::NodePath;
use thiserror::Error;

/// Top-level error type for the Valuto renderer.
#[derive(Debug, Error)]
pub enum ValutoError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A malformed tree, reported at the node where the bad shape was found.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Malformed node at {path}: {kind}")]
pub struct StructuralError {
    pub path: NodePath,
    pub kind: StructuralErrorKind,
}

impl StructuralError {
    pub fn new(path: NodePath, kind: StructuralErrorKind) -> Self {
        Self { path, kind }
    }
}

/// The specific structural violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralErrorKind {
    #[error("expected a tree (array of nodes), found {found}")]
    ExpectedTree { found: &'static str },

    #[error("expected a node object, found {found}")]
    ExpectedNode { found: &'static str },

    #[error("node has no `type`")]
    MissingType,

    #[error("`type` must be a string, found {found}")]
    TypeNotString { found: &'static str },

    #[error("`props` must be an object, found {found}")]
    PropsNotObject { found: &'static str },

    #[error("`children` must be an array, found {found}")]
    ChildrenNotArray { found: &'static str },

    #[error("child {index} must be a string or a node, found {found}")]
    InvalidChild { index: usize, found: &'static str },

    #[error("invalid value for prop '{prop}' on {component}: {reason}")]
    InvalidProp {
        component: String,
        prop: String,
        reason: String,
    },

    #[error("maximum nesting depth ({depth}) exceeded")]
    TooDeep { depth: usize },

    #[error("no tree at JSON pointer '{pointer}'")]
    PointerNotFound { pointer: String },
}

/// Errors while loading a registry manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Primitive '{name}' has an invalid tag '{tag}'")]
    InvalidTag { name: String, tag: String },

    #[error("Empty component name in manifest")]
    EmptyName,
}

/// Human-readable name of a JSON value's kind, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
