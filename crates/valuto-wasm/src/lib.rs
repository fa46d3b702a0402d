//! WebAssembly bindings for the Valuto lesson renderer.
//!
//! ## Example
//!
//! ```js
//! import { ValutoRenderer } from 'valuto';
//!
//! const renderer = new ValutoRenderer();
//!
//! const doc = renderer.render(JSON.stringify(lesson.content), (action) => {
//!   if (action.kind === 'navigate') router.push(action.to);
//! });
//!
//! container.innerHTML = doc.toHtml();
//! button.addEventListener('click', () => doc.activate(new Uint32Array([2, 3, 0])));
//! ```

use serde::Serialize as _;
use std::rc::Rc;
use valuto_core::{Action, Tree};
use valuto_registry::{ComponentRegistry, RegistryManifest};
use valuto_render::{render_tree, to_html, ActionDispatcher, HtmlOptions, RenderedTree};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Forwards actions to a JavaScript callback as plain objects.
struct JsDispatcher {
    callback: js_sys::Function,
}

impl ActionDispatcher for JsDispatcher {
    fn dispatch(&self, action: &Action) {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = match action.value().serialize(&serializer) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "action could not be converted for dispatch");
                return;
            }
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &value) {
            tracing::warn!(error = ?e, "action dispatcher threw");
        }
    }
}

/// Renders lesson trees against a component registry.
#[wasm_bindgen]
pub struct ValutoRenderer {
    registry: ComponentRegistry,
}

#[wasm_bindgen]
impl ValutoRenderer {
    /// Create a renderer with the built-in primitives and icons.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            registry: ComponentRegistry::builtin(),
        }
    }

    /// Create a renderer from a registry manifest (JSON string).
    #[wasm_bindgen(js_name = fromManifest)]
    pub fn from_manifest(json: &str) -> Result<ValutoRenderer, JsError> {
        let registry = RegistryManifest::from_json_str(json)
            .and_then(RegistryManifest::into_registry)
            .map_err(|e| JsError::new(&format!("Invalid manifest: {}", e)))?;
        Ok(Self { registry })
    }

    /// Get the version of the renderer.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Check whether a type name resolves to a registered implementation.
    #[wasm_bindgen(js_name = hasComponent)]
    pub fn has_component(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// All registered type names, in order of first registration.
    #[wasm_bindgen(js_name = componentNames)]
    pub fn component_names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    /// Render a tree (JSON string). Actions are handed to `dispatch` when an element
    /// is activated; without it, actions are inert.
    pub fn render(
        &self,
        tree_json: &str,
        dispatch: Option<js_sys::Function>,
    ) -> Result<RenderedDocument, JsError> {
        let dispatcher = dispatch
            .map(|callback| Rc::new(JsDispatcher { callback }) as Rc<dyn ActionDispatcher>);
        let tree = self.render_inner(tree_json, dispatcher)?;
        Ok(RenderedDocument { tree })
    }

    /// Render a tree (JSON string) straight to HTML.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self, tree_json: &str, pretty: bool) -> Result<String, JsError> {
        let tree = self.render_inner(tree_json, None)?;
        Ok(to_html(&tree, &HtmlOptions { pretty, ..HtmlOptions::default() }))
    }
}

impl ValutoRenderer {
    fn render_inner(
        &self,
        tree_json: &str,
        dispatcher: Option<Rc<dyn ActionDispatcher>>,
    ) -> Result<RenderedTree, JsError> {
        let tree = Tree::from_json_str(tree_json)
            .map_err(|e| JsError::new(&format!("Invalid tree: {}", e)))?;
        render_tree(&tree, &self.registry, dispatcher)
            .map_err(|e| JsError::new(&format!("Render error: {}", e)))
    }
}

impl Default for ValutoRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a render, kept alive on the Rust side so activations can reach the
/// dispatcher.
#[wasm_bindgen]
pub struct RenderedDocument {
    tree: RenderedTree,
}

#[wasm_bindgen]
impl RenderedDocument {
    /// Number of top-level elements.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.tree.len()
    }

    #[wasm_bindgen(js_name = toHtml)]
    pub fn to_html(&self, pretty: Option<bool>) -> String {
        let options = HtmlOptions {
            pretty: pretty.unwrap_or(false),
            ..HtmlOptions::default()
        };
        to_html(&self.tree, &options)
    }

    /// The rendered tree as JSON. Handlers appear as `{"$action": ...}`.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.tree)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Activate the element at an index path (root index, then child indices).
    /// Returns whether an action was dispatched.
    pub fn activate(&self, path: &[u32]) -> bool {
        let path: Vec<usize> = path.iter().map(|&i| i as usize).collect();
        self.tree.activate(&path)
    }
}
