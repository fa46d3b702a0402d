//! Rendering of declarative lesson trees.
//!
//! A tree of typed nodes is walked against a component registry and turned into a tree
//! of instantiated elements. Nodes may carry an action payload; when the caller supplies
//! an [`ActionDispatcher`], activating the rendered element hands that payload to it.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use valuto_core::{Action, Tree};
//! use valuto_registry::ComponentRegistry;
//! use valuto_render::{render_json, ActionDispatcher};
//!
//! let registry = ComponentRegistry::builtin();
//! let dispatcher: Rc<dyn ActionDispatcher> = Rc::new(|action: &Action| println!("{:?}", action));
//!
//! let rendered = render_json(
//!     r#"[{"type": "Button", "props": {"action": {"kind": "next"}}, "children": ["Next"]}]"#,
//!     &registry,
//!     Some(dispatcher),
//! )?;
//! assert!(rendered.activate(&[0]));
//! # Ok::<(), valuto_core::ValutoError>(())
//! ```

pub mod audit;
mod dispatch;
mod element;
pub mod html;
mod walker;

pub use dispatch::{ActionDispatcher, ActivationHandler};
pub use element::{PropValue, Rendered, RenderedElement, RenderedTree, ACTIVATION_PROP};
pub use html::{to_html, HtmlOptions};
pub use walker::{RenderOptions, TreeWalker, DEFAULT_MAX_DEPTH};

use std::rc::Rc;
use valuto_core::{Child, NodePath, StructuralError, Tree, ValutoError};
use valuto_registry::ComponentRegistry;

/// Render a tree with default options.
pub fn render_tree(
    tree: &Tree,
    registry: &ComponentRegistry,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
) -> Result<RenderedTree, StructuralError> {
    render_tree_with(tree, registry, dispatcher, &RenderOptions::default())
}

/// Render a tree. Each top-level node is walked in order and keyed by its position.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
pub fn render_tree_with(
    tree: &Tree,
    registry: &ComponentRegistry,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
    options: &RenderOptions,
) -> Result<RenderedTree, StructuralError> {
    let walker = TreeWalker::new(registry, dispatcher).with_options(options.clone());
    let root = NodePath::root();

    let roots = tree
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| {
            walker
                .walk_node(node, index, &root.child(index))
                .map(Rendered::Element)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RenderedTree { roots })
}

/// Validate a JSON tree and render it.
pub fn render_json(
    json: &str,
    registry: &ComponentRegistry,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
) -> Result<RenderedTree, ValutoError> {
    let tree = Tree::from_json_str(json)?;
    Ok(render_tree(&tree, registry, dispatcher)?)
}

/// Render a single child outside of a tree, e.g. a fragment inserted by the host.
pub fn render_child(
    child: &Child,
    registry: &ComponentRegistry,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
) -> Result<Rendered, StructuralError> {
    TreeWalker::new(registry, dispatcher).walk(child, 0, &NodePath::root().child(0))
}
