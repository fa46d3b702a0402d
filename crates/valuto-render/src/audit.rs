//! Finding type names that no registry entry matches.
//!
//! Rendering deliberately passes unknown names through, so a misspelled component
//! silently becomes a literal tag. The audit surfaces those names for authoring tools.

use valuto_core::{Child, Node, NodePath, Tree};
use valuto_registry::ComponentRegistry;

/// A node whose type name resolves to passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub path: NodePath,
    pub type_name: String,
}

/// All passthrough nodes in `tree`, in document order.
pub fn unresolved(tree: &Tree, registry: &ComponentRegistry) -> Vec<Unresolved> {
    let mut found = Vec::new();
    for (index, node) in tree.nodes().iter().enumerate() {
        collect(node, &NodePath::root().child(index), registry, &mut found);
    }
    found
}

fn collect(
    node: &Node,
    path: &NodePath,
    registry: &ComponentRegistry,
    found: &mut Vec<Unresolved>,
) {
    if !registry.contains(&node.type_name) {
        found.push(Unresolved {
            path: path.clone(),
            type_name: node.type_name.clone(),
        });
    }
    for (index, child) in node.children.iter().enumerate() {
        if let Child::Node(child) = child {
            collect(child, &path.child(index), registry, found);
        }
    }
}
