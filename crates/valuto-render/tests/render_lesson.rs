use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use valuto_core::{Action, Child, Node, StructuralErrorKind, Tree, ValutoError};
use valuto_registry::{
    BadgeVariant, ComponentRegistry, Implementation, PrimitiveConfig, Resolved,
};
use valuto_render::{
    audit, render_child, render_json, render_tree, to_html, ActionDispatcher, HtmlOptions, Rendered,
    ACTIVATION_PROP,
};

const LESSON: &str = include_str!("fixtures/budgeting_lesson.json");

fn lesson_tree() -> Tree {
    let document: Value = serde_json::from_str(LESSON).unwrap();
    Tree::from_document(&document, "/content").unwrap()
}

/// A dispatcher that records every payload it receives.
fn recorder() -> (Rc<dyn ActionDispatcher>, Rc<RefCell<Vec<Action>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let dispatcher: Rc<dyn ActionDispatcher> =
        Rc::new(move |action: &Action| sink.borrow_mut().push(action.clone()));
    (dispatcher, seen)
}

#[test]
fn test_div_with_class_and_text() {
    let rendered = render_json(
        r#"[{"type": "div", "props": {"className": "x"}, "children": ["hello"]}]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap();

    assert_eq!(rendered.len(), 1);
    let div = rendered.element_at(&[0]).unwrap();
    assert_eq!(div.name(), "div");
    assert_eq!(div.value("className"), Some(&json!("x")));
    assert_eq!(div.children, vec![Rendered::Text("hello".to_string())]);
}

#[test]
fn test_icon_instantiated_with_class() {
    let rendered = render_json(
        r#"[{"type": "CheckCircle", "props": {"className": "h-5 w-5"}}]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap();

    let icon = rendered.element_at(&[0]).unwrap();
    match &icon.implementation {
        Resolved::Known(Implementation::Icon(glyph)) => assert_eq!(glyph.name, "CheckCircle"),
        other => panic!("Expected icon, got {:?}", other),
    }
    assert_eq!(icon.value("className"), Some(&json!("h-5 w-5")));
    assert!(icon.children.is_empty());
}

#[test]
fn test_button_action_dispatched_once() {
    let (dispatcher, seen) = recorder();
    let rendered = render_json(
        r#"[{"type": "button", "props": {"action": {"kind": "navigate", "to": "/next"}}, "children": ["Go"]}]"#,
        &ComponentRegistry::builtin(),
        Some(dispatcher),
    )
    .unwrap();

    assert!(seen.borrow().is_empty());
    assert!(rendered.activate(&[0]));
    assert_eq!(*seen.borrow(), vec![Action::new(json!({"kind": "navigate", "to": "/next"}))]);
}

#[test]
fn test_action_without_dispatcher_is_inert() {
    let rendered = render_json(
        r#"[{"type": "button", "props": {"action": {"kind": "navigate"}}, "children": ["Go"]}]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap();

    let button = rendered.element_at(&[0]).unwrap();
    assert!(button.prop("action").is_none());
    assert!(button.prop(ACTIVATION_PROP).is_none());
    assert!(!rendered.activate(&[0]));
}

#[test]
fn test_action_key_never_forwarded() {
    let (dispatcher, _) = recorder();
    let rendered = render_json(
        r#"[{"type": "Button", "props": {"action": "finish", "className": "w-full"}}]"#,
        &ComponentRegistry::builtin(),
        Some(dispatcher),
    )
    .unwrap();

    let button = rendered.element_at(&[0]).unwrap();
    let keys: Vec<_> = button.props.keys().map(String::as_str).collect();
    assert_eq!(keys, ["className", ACTIVATION_PROP]);
    assert_eq!(button.handler().map(|h| h.action()), Some(&Action::new("finish")));
}

#[test]
fn test_unknown_type_passes_through() {
    let rendered = render_json(
        r#"[{"type": "Mystery", "children": []}, {"type": "totally-unregistered-name"}]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap();

    let mystery = rendered.element_at(&[0]).unwrap();
    assert_eq!(mystery.implementation, Resolved::Passthrough("Mystery".to_string()));
    assert!(mystery.children.is_empty());
    assert_eq!(rendered.element_at(&[1]).unwrap().name(), "totally-unregistered-name");
}

#[test]
fn test_deep_nesting_preserved() {
    let tree = Tree::new(vec![Node::new("Card").with_child(
        Node::new("CardContent").with_child(
            Node::new("ul")
                .with_child(Node::new("li").with_child(Node::new("strong").with_text("text"))),
        ),
    )]);

    let rendered = render_tree(&tree, &ComponentRegistry::builtin(), None).unwrap();
    let names: Vec<_> = (1..=5)
        .map(|depth| rendered.element_at(&vec![0; depth]).unwrap().name().to_string())
        .collect();
    assert_eq!(names, ["Card", "CardContent", "ul", "li", "strong"]);

    let strong = rendered.element_at(&[0, 0, 0, 0, 0]).unwrap();
    assert_eq!(strong.children, vec![Rendered::Text("text".to_string())]);
}

#[test]
fn test_render_is_repeatable() {
    let tree = lesson_tree();
    let registry = ComponentRegistry::builtin();

    let (first_dispatcher, _) = recorder();
    let (second_dispatcher, _) = recorder();
    let first = render_tree(&tree, &registry, Some(first_dispatcher)).unwrap();
    let second = render_tree(&tree, &registry, Some(second_dispatcher)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_lesson_fixture() {
    let tree = lesson_tree();
    let registry = ComponentRegistry::builtin();
    let (dispatcher, seen) = recorder();
    let rendered = render_tree(&tree, &registry, Some(dispatcher)).unwrap();

    assert_eq!(rendered.len(), 3);

    let title = rendered.element_at(&[0, 0, 0]).unwrap();
    assert_eq!(title.name(), "CardTitle");
    assert_eq!(title.text_content(), "What is a budget?");

    let list = rendered.element_at(&[0, 1, 0]).unwrap();
    assert_eq!(
        list.text_content(),
        "50% for needs30% for wants20% for savings"
    );

    // Answer "wants", then move on.
    assert!(rendered.activate(&[2, 0, 2]));
    assert!(rendered.activate(&[2, 1, 0]));
    assert!(!rendered.activate(&[2, 0, 0]));
    assert_eq!(
        *seen.borrow(),
        vec![
            Action::new(json!({"kind": "answer", "quiz": "q1", "choice": "wants"})),
            Action::new(json!({"kind": "navigate", "to": "/lessons/emergency-fund"})),
        ]
    );

    // Only plain HTML tags fall through to passthrough.
    let passthrough: Vec<_> = audit::unresolved(&tree, &registry)
        .into_iter()
        .map(|u| u.type_name)
        .collect();
    assert_eq!(passthrough, ["ul", "li", "strong", "li", "strong", "li", "strong", "p"]);
}

#[test]
fn test_lesson_html() {
    let (dispatcher, _) = recorder();
    let rendered =
        render_tree(&lesson_tree(), &ComponentRegistry::builtin(), Some(dispatcher)).unwrap();
    let html = to_html(&rendered, &HtmlOptions::default());

    assert!(html.starts_with("<div class=\"rounded-lg border bg-card text-card-foreground shadow-sm mb-6\">"));
    assert!(html.contains("<h3 class=\"text-2xl font-semibold leading-none tracking-tight flex items-center gap-2\"><svg"));
    assert!(html.contains("<li><strong>50%</strong> for needs</li>"));
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("data-action=\"{&quot;kind&quot;:&quot;answer&quot;,&quot;quiz&quot;:&quot;q1&quot;,&quot;choice&quot;:&quot;needs&quot;}\""));
    assert!(!html.contains("variant="));
}

#[test]
fn test_structural_error_aborts_render() {
    let err = render_json(
        r#"[{"type": "Card", "children": [{"type": "CardContent", "children": {"type": "p"}}]}]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap_err();

    match err {
        ValutoError::Structural(err) => {
            assert_eq!(err.path.indices(), &[0, 0]);
            assert!(matches!(err.kind, StructuralErrorKind::ChildrenNotArray { .. }));
        }
        other => panic!("Expected structural error, got {:?}", other),
    }
}

#[test]
fn test_misspelled_variant_keeps_lesson() {
    let rendered = render_json(
        r#"[
            {"type": "Card", "children": ["intro", {"type": "Badge", "props": {"variant": "succes"}, "children": ["New"]}]},
            {"type": "p", "children": ["rest of lesson"]}
        ]"#,
        &ComponentRegistry::builtin(),
        None,
    )
    .unwrap();

    assert_eq!(rendered.len(), 2);
    let badge = rendered.element_at(&[0, 1]).unwrap();
    assert_eq!(badge.config, PrimitiveConfig::Badge { variant: BadgeVariant::Default });

    let html = to_html(&rendered, &HtmlOptions::default());
    assert!(html.contains(BadgeVariant::Default.class()));
    assert!(html.contains("<p>rest of lesson</p>"));
}

#[test]
fn test_null_action_is_inert() {
    let (dispatcher, seen) = recorder();
    let rendered = render_json(
        r#"[{"type": "Button", "props": {"action": null}, "children": ["Go"]}]"#,
        &ComponentRegistry::builtin(),
        Some(dispatcher),
    )
    .unwrap();

    let button = rendered.element_at(&[0]).unwrap();
    assert!(button.handler().is_none());
    assert!(button.prop("action").is_none());
    assert!(!rendered.activate(&[0]));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_render_child() {
    let registry = ComponentRegistry::builtin();
    let text = render_child(&Child::Text("loose".to_string()), &registry, None).unwrap();
    assert_eq!(text, Rendered::Text("loose".to_string()));

    let badge = Child::Node(Node::new("Badge").with_text("New"));
    let badge = render_child(&badge, &registry, None).unwrap();
    assert_eq!(badge.as_element().map(|e| e.name()), Some("Badge"));
}
