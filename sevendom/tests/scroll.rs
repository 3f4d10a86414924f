use sevendom::{layout, Element, Event, Overflow, Rect, ScrollState, Size};

fn page() -> Element {
    Element::col()
        .id("page")
        .width(Size::Fixed(20))
        .height(Size::Fixed(3))
        .overflow_y(Overflow::Auto)
        .child(Element::text("a").id("a"))
        .child(Element::text("b").id("b"))
        .child(Element::text("c").id("c"))
        .child(Element::text("d").id("d"))
        .child(Element::text("e").id("e"))
        .child(Element::text("f").id("f"))
}

#[test]
fn test_scroll_by_clamps_to_content() {
    let root = page();
    let result = layout(&root, Rect::from_size(20, 3));
    let mut scroll = ScrollState::new();

    // Six rows in a three-row viewport leave three rows of travel.
    assert!(scroll.scroll_by("page", &root, &result, 10));
    assert_eq!(scroll.get("page"), 3);

    // Already at the bottom.
    assert!(!scroll.scroll_by("page", &root, &result, 1));

    assert!(scroll.scroll_by("page", &root, &result, -10));
    assert_eq!(scroll.get("page"), 0);
}

#[test]
fn test_wheel_scrolls_element_under_cursor() {
    let root = page();
    let result = layout(&root, Rect::from_size(20, 3));
    let mut scroll = ScrollState::new();

    let wheel = Event::Scroll {
        target: Some("page".to_string()),
        x: 1,
        y: 1,
        delta_y: 2,
    };
    let consumed = scroll.process_events(&[wheel], &root, &result);

    assert_eq!(consumed.len(), 1);
    assert_eq!(scroll.get("page"), 2);
}

#[test]
fn test_apply_writes_offset_into_tree() {
    let mut root = page();
    let result = layout(&root, Rect::from_size(20, 3));
    let mut scroll = ScrollState::new();
    scroll.scroll_by("page", &root, &result, 2);

    scroll.apply(&mut root);
    assert_eq!(root.scroll_offset, (0, 2));
}

#[test]
fn test_scroll_on_unknown_element_is_ignored() {
    let root = page();
    let result = layout(&root, Rect::from_size(20, 3));
    let mut scroll = ScrollState::new();
    assert!(!scroll.scroll_by("nope", &root, &result, 2));
}
