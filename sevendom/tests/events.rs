use crossterm::event::{
    Event as CtEvent, KeyModifiers, MouseButton as CtMouseButton, MouseEvent, MouseEventKind,
};
use sevendom::{hit_test, hit_test_any, Element, Event, EventTranslator, LayoutResult, Rect};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn mouse_down(x: u16, y: u16) -> CtEvent {
    CtEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(CtMouseButton::Left),
        column: x,
        row: y,
        modifiers: KeyModifiers::NONE,
    })
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_point_inside() {
    let root = Element::box_()
        .id("root")
        .clickable(true)
        .child(Element::text("Click me").id("btn").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(10, 10, 30, 3)),
    ]);

    // Click inside btn
    assert_eq!(hit_test(&layout, &root, 15, 11), Some("btn".to_string()));

    // Click inside root but outside btn
    assert_eq!(hit_test(&layout, &root, 5, 5), Some("root".to_string()));

    // Click outside everything
    assert_eq!(hit_test(&layout, &root, 99, 49), Some("root".to_string()));
}

#[test]
fn test_hit_test_overlapping_elements() {
    // Later children should be "on top"
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("bottom").clickable(true))
        .child(Element::box_().id("top").clickable(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("bottom", Rect::new(10, 10, 50, 50)),
        ("top", Rect::new(30, 30, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 40, 40), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 15, 15), Some("bottom".to_string()));
}

#[test]
fn test_hit_test_only_clickable() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("Not clickable").id("text"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("text", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(hit_test(&layout, &root, 15, 11), None);
}

#[test]
fn test_hit_test_any() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("Not clickable").id("text"));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("text", Rect::new(10, 10, 30, 3)),
    ]);

    assert_eq!(
        hit_test_any(&layout, &root, 15, 11),
        Some("text".to_string())
    );
}

#[test]
fn test_hit_test_skips_elements_without_rect() {
    // Display::None elements get no rect from layout and can't be hit.
    let root = Element::box_()
        .id("root")
        .child(Element::text("gone").id("gone").clickable(true));

    let layout = create_layout(&[("root", Rect::new(0, 0, 100, 50))]);

    assert_eq!(hit_test(&layout, &root, 10, 10), None);
}

// ============================================================================
// Event translation
// ============================================================================

#[test]
fn test_click_targets_clickable() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("btn").id("btn").clickable(true));
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("btn", Rect::new(0, 0, 10, 1)),
    ]);

    let mut translator = EventTranslator::new();
    let events = translator.translate(&[mouse_down(2, 0)], &root, &layout);

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::Click { target, .. } => assert_eq!(target.as_deref(), Some("btn")),
        other => panic!("expected click, got {other:?}"),
    }
}

#[test]
fn test_second_click_synthesizes_double_click() {
    let root = Element::box_().id("root").clickable(true);
    let layout = create_layout(&[("root", Rect::new(0, 0, 100, 50))]);

    let mut translator = EventTranslator::new();
    let first = translator.translate(&[mouse_down(5, 5)], &root, &layout);
    let second = translator.translate(&[mouse_down(5, 5)], &root, &layout);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
    assert!(matches!(second[0], Event::Click { .. }));
    assert!(matches!(second[1], Event::DoubleClick { .. }));
}

#[test]
fn test_click_elsewhere_is_not_a_double_click() {
    let root = Element::box_().id("root").clickable(true);
    let layout = create_layout(&[("root", Rect::new(0, 0, 100, 50))]);

    let mut translator = EventTranslator::new();
    translator.translate(&[mouse_down(5, 5)], &root, &layout);
    let events = translator.translate(&[mouse_down(6, 5)], &root, &layout);

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Event::Click { .. }));
}

#[test]
fn test_triple_click_is_not_two_doubles() {
    let root = Element::box_().id("root").clickable(true);
    let layout = create_layout(&[("root", Rect::new(0, 0, 100, 50))]);

    let mut translator = EventTranslator::new();
    translator.translate(&[mouse_down(5, 5)], &root, &layout);
    let second = translator.translate(&[mouse_down(5, 5)], &root, &layout);
    let third = translator.translate(&[mouse_down(5, 5)], &root, &layout);

    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 1);
}

#[test]
fn test_resize_passthrough() {
    let root = Element::box_().id("root");
    let layout = create_layout(&[("root", Rect::new(0, 0, 100, 50))]);

    let mut translator = EventTranslator::new();
    let events = translator.translate(&[CtEvent::Resize(120, 40)], &root, &layout);

    assert_eq!(
        events,
        vec![Event::Resize {
            width: 120,
            height: 40
        }]
    );
}
