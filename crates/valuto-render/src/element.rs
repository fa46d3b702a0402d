//! The rendered element tree produced by the walker.

use crate::dispatch::ActivationHandler;
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use valuto_registry::{PrimitiveConfig, Resolved};

/// Prop name under which a synthesized activation handler is attached.
pub const ACTIVATION_PROP: &str = "onClick";

/// A prop forwarded to an implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Value(Value),
    Handler(ActivationHandler),
}

impl PropValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(value) => Some(value),
            PropValue::Handler(_) => None,
        }
    }

    pub fn as_handler(&self) -> Option<&ActivationHandler> {
        match self {
            PropValue::Handler(handler) => Some(handler),
            PropValue::Value(_) => None,
        }
    }
}

/// One rendered unit: a text leaf or an instantiated element.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Element(RenderedElement),
}

impl Rendered {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&RenderedElement> {
        match self {
            Rendered::Element(element) => Some(element),
            Rendered::Text(_) => None,
        }
    }
}

/// An implementation instantiated with its props and rendered children.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    /// Position among its siblings.
    pub key: usize,
    pub implementation: Resolved,
    /// Typed configuration read from the props of a built-in primitive.
    pub config: PrimitiveConfig,
    pub props: IndexMap<String, PropValue>,
    pub children: Vec<Rendered>,
}

impl RenderedElement {
    /// Identity of the element: the registry name, or the literal type for passthrough.
    pub fn name(&self) -> &str {
        self.implementation.name()
    }

    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// A plain (non-handler) prop value.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.prop(key).and_then(PropValue::as_value)
    }

    pub fn handler(&self) -> Option<&ActivationHandler> {
        self.prop(ACTIVATION_PROP).and_then(PropValue::as_handler)
    }

    /// Simulate activation. Returns whether a handler fired; elements without one do
    /// nothing.
    pub fn activate(&self) -> bool {
        match self.handler() {
            Some(handler) => {
                handler.fire();
                true
            }
            None => false,
        }
    }

    /// Concatenated text of all descendant leaves, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(children: &[Rendered], out: &mut String) {
    for child in children {
        match child {
            Rendered::Text(text) => out.push_str(text),
            Rendered::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// The rendered form of a whole tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedTree {
    pub roots: Vec<Rendered>,
}

impl RenderedTree {
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rendered> {
        self.roots.iter()
    }

    /// Find the element at an index path (root index, then child indices).
    pub fn element_at(&self, path: &[usize]) -> Option<&RenderedElement> {
        let (first, rest) = path.split_first()?;
        let mut current = self.roots.get(*first)?.as_element()?;
        for index in rest {
            current = current.children.get(*index)?.as_element()?;
        }
        Some(current)
    }

    /// Activate the element at `path`. Returns whether a handler fired.
    pub fn activate(&self, path: &[usize]) -> bool {
        self.element_at(path).is_some_and(RenderedElement::activate)
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropValue::Value(value) => value.serialize(serializer),
            PropValue::Handler(handler) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$action", handler.action())?;
                map.end()
            }
        }
    }
}

impl Serialize for Rendered {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rendered::Text(text) => serializer.serialize_str(text),
            Rendered::Element(element) => element.serialize(serializer),
        }
    }
}

impl Serialize for RenderedElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match &self.implementation {
            Resolved::Known(implementation) => implementation.kind(),
            Resolved::Passthrough(_) => "passthrough",
        };
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("key", &self.key)?;
        map.serialize_entry("type", self.name())?;
        map.serialize_entry("kind", kind)?;
        map.serialize_entry("props", &self.props)?;
        map.serialize_entry("children", &self.children)?;
        map.end()
    }
}

impl Serialize for RenderedTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.roots.len()))?;
        for root in &self.roots {
            seq.serialize_element(root)?;
        }
        seq.end()
    }
}
