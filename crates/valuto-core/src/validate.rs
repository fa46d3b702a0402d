//! Structural validation of JSON documents into trees.
//!
//! Lesson content arrives as untrusted JSON. Every node is checked for shape while it is
//! converted, and the first violation aborts with the path of the offending node.

use crate::errors::{json_kind, StructuralError, StructuralErrorKind, ValutoError};
use crate::node::{Action, Child, Node, Props, Tree, ACTION_KEY};
use crate::path::NodePath;
use serde_json::{Map, Value};

impl Tree {
    /// Validate a JSON value shaped as an array of nodes.
    pub fn from_value(value: &Value) -> Result<Tree, StructuralError> {
        let root = NodePath::root();
        let items = value.as_array().ok_or_else(|| {
            StructuralError::new(
                root.clone(),
                StructuralErrorKind::ExpectedTree {
                    found: json_kind(value),
                },
            )
        })?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| node_from_value(item, &root.child(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Tree)
    }

    /// Parse and validate a JSON string shaped as an array of nodes.
    pub fn from_json_str(json: &str) -> Result<Tree, ValutoError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    /// Select the tree embedded in a larger lesson document with a JSON pointer
    /// (e.g. `/content`). An empty pointer selects the whole document.
    pub fn from_document(document: &Value, pointer: &str) -> Result<Tree, StructuralError> {
        let value = document.pointer(pointer).ok_or_else(|| {
            StructuralError::new(
                NodePath::root(),
                StructuralErrorKind::PointerNotFound {
                    pointer: pointer.to_string(),
                },
            )
        })?;
        Self::from_value(value)
    }
}

impl Node {
    /// Validate a single node object. `path` locates it for error reporting.
    pub fn from_value(value: &Value, path: &NodePath) -> Result<Node, StructuralError> {
        node_from_value(value, path)
    }
}

fn node_from_value(value: &Value, path: &NodePath) -> Result<Node, StructuralError> {
    let fail = |kind| StructuralError::new(path.clone(), kind);

    let object = value.as_object().ok_or_else(|| {
        fail(StructuralErrorKind::ExpectedNode {
            found: json_kind(value),
        })
    })?;

    let type_name = match object.get("type") {
        None | Some(Value::Null) => return Err(fail(StructuralErrorKind::MissingType)),
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            return Err(fail(StructuralErrorKind::TypeNotString {
                found: json_kind(other),
            }))
        }
    };

    let (props, action) = match object.get("props") {
        None | Some(Value::Null) => (Props::new(), None),
        Some(Value::Object(map)) => split_props(map),
        Some(other) => {
            return Err(fail(StructuralErrorKind::PropsNotObject {
                found: json_kind(other),
            }))
        }
    };

    let children = match object.get("children") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| child_from_value(item, index, path))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(fail(StructuralErrorKind::ChildrenNotArray {
                found: json_kind(other),
            }))
        }
    };

    Ok(Node {
        type_name,
        props,
        action,
        children,
    })
}

fn child_from_value(
    value: &Value,
    index: usize,
    parent: &NodePath,
) -> Result<Child, StructuralError> {
    match value {
        Value::String(text) => Ok(Child::Text(text.clone())),
        Value::Object(_) => node_from_value(value, &parent.child(index)).map(Child::Node),
        other => Err(StructuralError::new(
            parent.clone(),
            StructuralErrorKind::InvalidChild {
                index,
                found: json_kind(other),
            },
        )),
    }
}

fn split_props(map: &Map<String, Value>) -> (Props, Option<Action>) {
    let mut props = Props::with_capacity(map.len());
    let mut action = None;
    for (key, value) in map {
        if key == ACTION_KEY {
            // A null action is the same as none.
            if !value.is_null() {
                action = Some(Action(value.clone()));
            }
        } else {
            props.insert(key.clone(), value.clone());
        }
    }
    (props, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_tree() {
        let tree = Tree::from_value(&json!([
            {"type": "div", "props": {"className": "x"}, "children": ["hello"]}
        ]))
        .unwrap();

        assert_eq!(tree.len(), 1);
        let node = &tree.nodes()[0];
        assert_eq!(node.type_name, "div");
        assert_eq!(node.prop("className"), Some(&json!("x")));
        assert_eq!(node.children, vec![Child::Text("hello".to_string())]);
    }

    #[test]
    fn test_defaults_when_absent_or_null() {
        let tree = Tree::from_value(&json!([
            {"type": "CheckCircle"},
            {"type": "hr", "props": null, "children": null}
        ]))
        .unwrap();

        for node in tree.nodes() {
            assert!(node.props.is_empty());
            assert!(node.children.is_empty());
            assert!(node.action.is_none());
        }
    }

    #[test]
    fn test_action_is_lifted_out_of_props() {
        let tree = Tree::from_value(&json!([
            {"type": "button", "props": {"action": {"kind": "navigate", "to": "/next"}, "id": "b"}}
        ]))
        .unwrap();

        let node = &tree.nodes()[0];
        assert!(!node.props.contains_key("action"));
        assert_eq!(node.action, Some(Action(json!({"kind": "navigate", "to": "/next"}))));
    }

    #[test]
    fn test_null_action_is_absent() {
        let tree = Tree::from_value(&json!([
            {"type": "button", "props": {"action": null, "id": "b"}}
        ]))
        .unwrap();

        let node = &tree.nodes()[0];
        assert!(!node.props.contains_key("action"));
        assert_eq!(node.action, None);
    }

    #[test]
    fn test_props_keep_authoring_order() {
        let tree =
            Tree::from_json_str(r#"[{"type": "a", "props": {"z": 1, "a": 2, "m": 3}}]"#).unwrap();
        let keys: Vec<_> = tree.nodes()[0].props.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_root_not_array() {
        let err = Tree::from_value(&json!({"type": "div"})).unwrap_err();
        assert!(err.path.is_root());
        assert_eq!(err.kind, StructuralErrorKind::ExpectedTree { found: "an object" });
    }

    #[test]
    fn test_missing_type_reports_path() {
        let err = Tree::from_value(&json!([
            {"type": "Card", "children": [
                "intro",
                {"type": "CardContent", "children": [{"props": {}}]}
            ]}
        ]))
        .unwrap_err();

        assert_eq!(err.kind, StructuralErrorKind::MissingType);
        assert_eq!(err.path.indices(), &[0, 1, 0]);
        assert_eq!(
            err.to_string(),
            "Malformed node at tree[0].children[1].children[0]: node has no `type`"
        );
    }

    #[test]
    fn test_type_not_string() {
        let err = Tree::from_value(&json!([{"type": 7}])).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::TypeNotString { found: "a number" });
    }

    #[test]
    fn test_children_not_array() {
        let err = Tree::from_value(&json!([{"type": "ul", "children": "li"}])).unwrap_err();
        assert_eq!(err.path.indices(), &[0]);
        assert_eq!(err.kind, StructuralErrorKind::ChildrenNotArray { found: "a string" });
    }

    #[test]
    fn test_props_not_object() {
        let err = Tree::from_value(&json!([{"type": "ul", "props": ["x"]}])).unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::PropsNotObject { found: "an array" });
    }

    #[test]
    fn test_invalid_child() {
        let err = Tree::from_value(&json!([{"type": "p", "children": ["a", 42]}])).unwrap_err();
        assert_eq!(err.path.indices(), &[0]);
        assert_eq!(err.kind, StructuralErrorKind::InvalidChild { index: 1, found: "a number" });
    }

    #[test]
    fn test_entry_not_object() {
        let err = Tree::from_value(&json!([{"type": "p"}, "loose text"])).unwrap_err();
        assert_eq!(err.path.indices(), &[1]);
        assert_eq!(err.kind, StructuralErrorKind::ExpectedNode { found: "a string" });
    }

    #[test]
    fn test_from_document_pointer() {
        let lesson = json!({
            "slug": "budgeting-101",
            "content": [{"type": "p", "children": ["Track every dollar."]}]
        });

        let tree = Tree::from_document(&lesson, "/content").unwrap();
        assert_eq!(tree.len(), 1);

        let err = Tree::from_document(&lesson, "/body").unwrap_err();
        assert_eq!(err.kind, StructuralErrorKind::PointerNotFound { pointer: "/body".to_string() });
    }

    #[test]
    fn test_invalid_json() {
        let err = Tree::from_json_str("[{").unwrap_err();
        assert!(matches!(err, ValutoError::Json(_)));
    }
}
