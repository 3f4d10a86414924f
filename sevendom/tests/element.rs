use sevendom::{
    collect_by_class, descendant_with_class, find_element, find_element_mut, remove_child_by_id,
    Display, Element,
};

// ============================================================================
// Class list operations
// ============================================================================

#[test]
fn test_add_class_no_duplicates() {
    let mut el = Element::box_();
    el.add_class("a");
    el.add_class("a");
    el.add_class("b");

    assert_eq!(el.classes, vec!["a", "b"]);
    assert!(el.has_class("a"));
    assert!(!el.has_class("c"));
}

#[test]
fn test_add_class_ignores_empty() {
    let mut el = Element::box_();
    el.add_class("");
    assert!(el.classes.is_empty());
}

#[test]
fn test_add_class_at_position() {
    let mut el = Element::box_().class("a").class("c");
    el.add_class_at(1, "b");
    assert_eq!(el.classes, vec!["a", "b", "c"]);
}

#[test]
fn test_add_class_at_past_end_appends() {
    let mut el = Element::box_().class("a");
    el.add_class_at(9, "z");
    assert_eq!(el.classes, vec!["a", "z"]);
}

#[test]
fn test_remove_class() {
    let mut el = Element::box_().class("a").class("b");
    el.remove_class("a");
    assert_eq!(el.classes, vec!["b"]);

    // Removing an absent class is a no-op.
    el.remove_class("missing");
    assert_eq!(el.classes, vec!["b"]);
}

// ============================================================================
// Tree queries
// ============================================================================

fn tree() -> Element {
    Element::col()
        .id("root")
        .child(
            Element::col()
                .id("section")
                .class("section")
                .child(Element::text("title").id("title").class("title"))
                .child(Element::text("body").id("body").class("content")),
        )
        .child(Element::text("footer").id("footer").class("section"))
}

#[test]
fn test_find_element() {
    let root = tree();
    assert!(find_element(&root, "title").is_some());
    assert!(find_element(&root, "nope").is_none());
}

#[test]
fn test_find_element_mut() {
    let mut root = tree();
    find_element_mut(&mut root, "body").unwrap().display = Display::None;
    assert_eq!(find_element(&root, "body").unwrap().display, Display::None);
}

#[test]
fn test_collect_by_class_document_order() {
    let root = tree();
    assert_eq!(collect_by_class(&root, "section"), vec!["section", "footer"]);
    assert!(collect_by_class(&root, "missing").is_empty());
}

#[test]
fn test_descendant_with_class() {
    let root = tree();
    assert_eq!(
        descendant_with_class(&root, "content").map(|el| el.id.clone()),
        Some("body".to_string())
    );
}

#[test]
fn test_remove_child_by_id() {
    let mut root = tree();
    let removed = remove_child_by_id(&mut root, "section").unwrap();
    assert_eq!(removed.id, "section");
    assert!(find_element(&root, "title").is_none());
    assert!(find_element(&root, "footer").is_some());
}

#[test]
fn test_prepend_child() {
    let mut root = Element::col().child(Element::text("second").id("second"));
    root.prepend_child(Element::text("first").id("first"));
    assert_eq!(root.child_elements()[0].id, "first");
    assert_eq!(root.child_elements()[1].id, "second");
}
