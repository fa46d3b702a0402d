//! Tree walking: turning nodes into rendered elements.
//!
//! For each node the walker:
//! 1. Resolves the type name against the registry (unknown names pass through)
//! 2. Splits the reserved action out of the props
//! 3. Wires the action to the dispatcher, when both are present
//! 4. Renders the children in document order

use crate::dispatch::{ActionDispatcher, ActivationHandler};
use crate::element::{PropValue, Rendered, RenderedElement, ACTIVATION_PROP};
use indexmap::IndexMap;
use std::rc::Rc;
use valuto_core::{Child, Node, NodePath, StructuralError, StructuralErrorKind};
use valuto_registry::{ComponentRegistry, Implementation, PrimitiveConfig, Resolved};

/// Default maximum nesting depth of a tree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Nodes nested deeper than this are rejected.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Walks nodes against a registry with an optional dispatcher.
///
/// The walker holds no state between calls; walking the same child twice yields
/// structurally equal output.
pub struct TreeWalker<'a> {
    registry: &'a ComponentRegistry,
    dispatcher: Option<Rc<dyn ActionDispatcher>>,
    options: RenderOptions,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        dispatcher: Option<Rc<dyn ActionDispatcher>>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render one child. Text leaves come back unchanged; nodes are resolved and
    /// rendered recursively. `path` locates the child for error reporting.
    pub fn walk(
        &self,
        child: &Child,
        key: usize,
        path: &NodePath,
    ) -> Result<Rendered, StructuralError> {
        match child {
            Child::Text(text) => Ok(Rendered::Text(text.clone())),
            Child::Node(node) => self.walk_node(node, key, path).map(Rendered::Element),
        }
    }

    /// Render one node.
    pub fn walk_node(
        &self,
        node: &Node,
        key: usize,
        path: &NodePath,
    ) -> Result<RenderedElement, StructuralError> {
        if path.depth() > self.options.max_depth {
            return Err(StructuralError::new(
                path.clone(),
                StructuralErrorKind::TooDeep {
                    depth: self.options.max_depth,
                },
            ));
        }

        let implementation = self.registry.resolve(&node.type_name);
        if implementation.is_passthrough() {
            tracing::debug!(
                type_name = %node.type_name,
                path = %path,
                "unresolved type rendered as passthrough"
            );
        }

        let (action, forwarded) = node.partition_props();

        let config = match &implementation {
            Resolved::Known(Implementation::Primitive(primitive)) => {
                primitive.configure(&forwarded).map_err(|e| {
                    StructuralError::new(
                        path.clone(),
                        StructuralErrorKind::InvalidProp {
                            component: primitive.name().to_string(),
                            prop: e.prop,
                            reason: e.reason,
                        },
                    )
                })?
            }
            _ => PrimitiveConfig::Plain,
        };

        let mut props: IndexMap<String, PropValue> = forwarded
            .into_iter()
            .map(|(key, value)| (key, PropValue::Value(value)))
            .collect();

        if let (Some(action), Some(dispatcher)) = (action, &self.dispatcher) {
            let handler = ActivationHandler::new(action, Rc::clone(dispatcher));
            props.insert(ACTIVATION_PROP.to_string(), PropValue::Handler(handler));
        }

        let children = node
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| self.walk(child, index, &path.child(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RenderedElement {
            key,
            implementation,
            config,
            props,
            children,
        })
    }
}
