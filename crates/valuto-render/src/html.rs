//! Static HTML output for rendered trees.
//!
//! Used for server-side rendering of lessons and for previews. Activation handlers
//! cannot be serialized, so their payload is emitted as a `data-action` attribute for
//! the hosting page to wire up.

use crate::element::{PropValue, Rendered, RenderedElement, RenderedTree};
use serde_json::Value;
use valuto_registry::{is_valid_tag_name, Implementation, Resolved};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Props merged into the single `class` attribute, in this order.
const CLASS_PROPS: [&str; 2] = ["class", "className"];

/// HTML output options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Put each element on its own indented line.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

/// Serialize a rendered tree to an HTML fragment.
pub fn to_html(tree: &RenderedTree, options: &HtmlOptions) -> String {
    let mut writer = HtmlWriter {
        out: String::new(),
        options,
    };
    for root in &tree.roots {
        writer.write_rendered(root, 0);
    }
    if options.pretty && !writer.out.is_empty() {
        writer.out.push('\n');
    }
    writer.out
}

struct HtmlWriter<'a> {
    out: String,
    options: &'a HtmlOptions,
}

/// How an element is emitted, derived from what it resolved to.
struct Shape<'e> {
    tag: &'e str,
    classes: Vec<String>,
    attributes: Vec<(&'e str, String)>,
    skipped: &'e [&'e str],
    inner: Option<&'e str>,
}

impl<'a> HtmlWriter<'a> {
    fn write_rendered(&mut self, rendered: &Rendered, depth: usize) {
        match rendered {
            Rendered::Text(text) => self.out.push_str(&escape_text(text)),
            Rendered::Element(element) => self.write_element(element, depth),
        }
    }

    fn newline(&mut self, depth: usize) {
        if self.options.pretty && !self.out.is_empty() {
            self.out.push('\n');
            self.out.push_str(&" ".repeat(depth * self.options.indent));
        }
    }

    fn write_element(&mut self, element: &RenderedElement, depth: usize) {
        let shape = shape_of(element);

        self.newline(depth);
        self.out.push('<');
        self.out.push_str(shape.tag);

        let mut classes = shape.classes;
        for key in CLASS_PROPS {
            if let Some(Value::String(class)) = element.value(key) {
                if !class.is_empty() {
                    classes.push(class.clone());
                }
            }
        }
        if !classes.is_empty() {
            write_attribute(&mut self.out, "class", &classes.join(" "));
        }
        for (name, value) in &shape.attributes {
            if !element.props.contains_key(*name) {
                write_attribute(&mut self.out, name, value);
            }
        }

        for (name, prop) in &element.props {
            let name = name.as_str();
            if CLASS_PROPS.iter().any(|c| *c == name) || shape.skipped.iter().any(|s| *s == name) {
                continue;
            }
            match prop {
                PropValue::Handler(handler) => {
                    let payload = handler.action().value().to_string();
                    write_attribute(&mut self.out, "data-action", &payload);
                }
                PropValue::Value(value) => self.write_prop(name, value),
            }
        }
        self.out.push('>');

        if VOID_ELEMENTS.iter().any(|v| *v == shape.tag) {
            if !element.children.is_empty() {
                tracing::debug!(tag = shape.tag, "children of void element dropped");
            }
            return;
        }

        if let Some(inner) = shape.inner {
            self.out.push_str(inner);
        }
        for child in &element.children {
            self.write_rendered(child, depth + 1);
        }

        if element.children.iter().any(|c| matches!(c, Rendered::Element(_))) {
            self.newline(depth);
        }
        self.out.push_str("</");
        self.out.push_str(shape.tag);
        self.out.push('>');
    }

    fn write_prop(&mut self, name: &str, value: &Value) {
        let attr = match name {
            "htmlFor" => "for",
            _ => name,
        };
        if !is_valid_attribute_name(attr) {
            tracing::debug!(prop = name, "prop with invalid attribute name dropped");
            return;
        }
        // Event handlers only ever come from actions.
        if attr.len() > 2 && attr[..2].eq_ignore_ascii_case("on") {
            tracing::debug!(prop = name, "inline event handler dropped");
            return;
        }

        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => {
                self.out.push(' ');
                self.out.push_str(attr);
            }
            Value::String(s) => write_attribute(&mut self.out, attr, s),
            Value::Number(n) => write_attribute(&mut self.out, attr, &n.to_string()),
            Value::Object(map) if attr == "style" => {
                let css = map
                    .iter()
                    .filter_map(|(property, value)| {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            Value::Number(n) => n.to_string(),
                            _ => return None,
                        };
                        Some(format!("{}:{}", css_property(property), value))
                    })
                    .collect::<Vec<_>>()
                    .join(";");
                write_attribute(&mut self.out, attr, &css);
            }
            other => write_attribute(&mut self.out, attr, &other.to_string()),
        }
    }
}

fn shape_of(element: &RenderedElement) -> Shape<'_> {
    match &element.implementation {
        Resolved::Known(Implementation::Primitive(primitive)) => Shape {
            tag: primitive.tag(),
            classes: std::iter::once(primitive.base_class())
                .chain(element.config.classes())
                .map(str::to_string)
                .collect(),
            attributes: element.config.attributes(),
            skipped: primitive.consumed_props(),
            inner: None,
        },
        Resolved::Known(Implementation::Custom(custom)) => Shape {
            tag: &custom.tag,
            classes: custom.class.iter().cloned().collect(),
            attributes: Vec::new(),
            skipped: &[],
            inner: None,
        },
        Resolved::Known(Implementation::Icon(glyph)) => Shape {
            tag: "svg",
            classes: vec![glyph.class_name()],
            attributes: vec![
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
                ("width", "24".to_string()),
                ("height", "24".to_string()),
                ("viewBox", glyph.view_box.clone()),
                ("fill", "none".to_string()),
                ("stroke", "currentColor".to_string()),
                ("stroke-width", "2".to_string()),
                ("stroke-linecap", "round".to_string()),
                ("stroke-linejoin", "round".to_string()),
                ("aria-hidden", "true".to_string()),
                ("data-icon", glyph.name.clone()),
            ],
            skipped: &[],
            inner: Some(glyph.body.as_str()),
        },
        Resolved::Passthrough(name) if is_valid_tag_name(name) => Shape {
            tag: name,
            classes: Vec::new(),
            attributes: Vec::new(),
            skipped: &[],
            inner: None,
        },
        Resolved::Passthrough(name) => Shape {
            tag: "div",
            classes: Vec::new(),
            attributes: vec![("data-type", name.clone())],
            skipped: &[],
            inner: None,
        },
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':' || c == '.')
}

/// `backgroundColor` -> `background-color`.
fn css_property(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
