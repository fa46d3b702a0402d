//! The declarative tree model.
//!
//! A lesson is authored as a tree of typed nodes: each node names what it renders as,
//! carries a bag of pass-through props, and holds an ordered list of children that are
//! either text leaves or further nodes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Props key reserved for the action payload.
pub const ACTION_KEY: &str = "action";

/// Pass-through properties, kept in authoring order.
pub type Props = IndexMap<String, Value>;

/// An opaque, content-authored payload forwarded verbatim to the host on activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(pub Value);

impl Action {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

/// A top-level document: an ordered sequence of nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree(pub Vec<Node>);

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Node> for Tree {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A child of a node: a text leaf or a nested node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Text(String),
    Node(Node),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

/// A typed node of declarative content.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node renders as. Resolved against the registry at render time.
    pub type_name: String,
    /// Pass-through properties. Never holds the reserved `action` key when built
    /// through the constructors in this crate.
    pub props: Props,
    /// Payload dispatched when the rendered element is activated.
    pub action: Option<Action>,
    pub children: Vec<Child>,
}

impl Node {
    /// Create a node with no props and no children.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            props: Props::new(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Set a prop. The reserved `action` key sets the node's action instead.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key == ACTION_KEY {
            let value = value.into();
            self.action = (!value.is_null()).then_some(Action(value));
        } else {
            self.props.insert(key, value.into());
        }
        self
    }

    /// Shorthand for the `className` prop.
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_prop("className", class.into())
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Child::Text(text.into()))
    }

    /// Get a prop value.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    /// Split into the action payload and the props forwarded to the implementation.
    ///
    /// An `action` key placed directly into `props` is still treated as reserved; an
    /// explicit `Node::action` takes precedence over it.
    pub fn partition_props(&self) -> (Option<Action>, Props) {
        let mut forwarded = self.props.clone();
        let stray = forwarded
            .shift_remove(ACTION_KEY)
            .filter(|value| !value.is_null())
            .map(Action);
        (self.action.clone().or(stray), forwarded)
    }
}
