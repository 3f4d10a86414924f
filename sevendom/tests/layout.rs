use sevendom::{layout, Border, Display, Edges, Element, Overflow, Rect, Size, Style};

fn area(width: u16, height: u16) -> Rect {
    Rect::from_size(width, height)
}

#[test]
fn test_column_stacks_children() {
    let root = Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(Element::text("one").id("one"))
        .child(Element::text("two").id("two"));

    let result = layout(&root, area(20, 10));

    let one = result.get("one").unwrap();
    let two = result.get("two").unwrap();
    assert_eq!(one.y, 0);
    assert_eq!(two.y, 1);
}

#[test]
fn test_gap_between_children() {
    let root = Element::col()
        .id("root")
        .height(Size::Fill)
        .gap(2)
        .child(Element::text("one").id("one"))
        .child(Element::text("two").id("two"));

    let result = layout(&root, area(20, 10));
    assert_eq!(result.get("two").unwrap().y, 3);
}

#[test]
fn test_display_none_has_no_rect() {
    let root = Element::col()
        .id("root")
        .child(Element::text("gone").id("gone").display(Display::None))
        .child(Element::text("kept").id("kept"));

    let result = layout(&root, area(20, 10));

    assert!(result.get("gone").is_none());
    // The hidden sibling takes no space.
    assert_eq!(result.get("kept").unwrap().y, 0);
}

#[test]
fn test_display_none_subtree_skipped() {
    let root = Element::col().id("root").child(
        Element::col()
            .id("hidden")
            .display(Display::None)
            .child(Element::text("inner").id("inner")),
    );

    let result = layout(&root, area(20, 10));
    assert!(result.get("hidden").is_none());
    assert!(result.get("inner").is_none());
}

#[test]
fn test_max_height_clamps() {
    let root = Element::col().id("root").child(
        Element::col()
            .id("clamped")
            .max_height(2)
            .child(Element::text("a"))
            .child(Element::text("b"))
            .child(Element::text("c"))
            .child(Element::text("d")),
    );

    let result = layout(&root, area(20, 10));
    assert_eq!(result.get("clamped").unwrap().height, 2);
}

#[test]
fn test_fill_splits_remaining_space() {
    let root = Element::row()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fixed(5))
        .child(Element::box_().id("left").width(Size::Fixed(10)))
        .child(Element::box_().id("a").width(Size::Fill))
        .child(Element::box_().id("b").width(Size::Fill));

    let result = layout(&root, area(30, 5));
    assert_eq!(result.get("a").unwrap().width, 10);
    assert_eq!(result.get("b").unwrap().width, 10);
}

#[test]
fn test_padding_and_border_shrink_content() {
    let root = Element::col()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .padding(Edges::all(1))
        .style(Style::new().border(Border::Single))
        .child(Element::text("inner").id("inner").width(Size::Fill));

    let result = layout(&root, area(20, 10));
    let inner = result.get("inner").unwrap();
    assert_eq!(inner.x, 2);
    assert_eq!(inner.y, 2);
    assert_eq!(inner.width, 16);
}

#[test]
fn test_table_rows_stack_like_rows() {
    let root = Element::col()
        .id("table")
        .width(Size::Fixed(20))
        .child(
            Element::table_row()
                .id("r1")
                .width(Size::Fill)
                .child(Element::text("a").id("a").width(Size::Fixed(5)))
                .child(Element::text("b").id("b").width(Size::Fixed(5))),
        )
        .child(Element::table_row().id("r2").width(Size::Fill).child(Element::text("c")));

    let result = layout(&root, area(20, 10));
    let a = result.get("a").unwrap();
    let b = result.get("b").unwrap();
    assert_eq!(a.y, 0);
    assert_eq!(b.x, 5);
    assert_eq!(result.get("r2").unwrap().y, 1);
}

#[test]
fn test_scrolled_container_shifts_children() {
    let root = Element::col()
        .id("page")
        .height(Size::Fixed(3))
        .overflow_y(Overflow::Auto)
        .scroll_offset(0, 2)
        .child(Element::text("a").id("a"))
        .child(Element::text("b").id("b"))
        .child(Element::text("c").id("c"))
        .child(Element::text("d").id("d"));

    let result = layout(&root, area(20, 3));

    // The first two rows are scrolled out, the third lands on top.
    assert!(result.get("a").is_none());
    assert!(result.get("b").is_none());
    assert_eq!(result.get("c").unwrap().y, 0);
    assert_eq!(result.get("d").unwrap().y, 1);
}

#[test]
fn test_absolute_child_ignores_flow() {
    let root = Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(Element::text("flow").id("flow"))
        .child(
            Element::box_()
                .id("overlay")
                .position(sevendom::Position::Absolute)
                .left(5)
                .top(4)
                .width(Size::Fixed(8))
                .height(Size::Fixed(3)),
        );

    let result = layout(&root, area(30, 10));
    let overlay = result.get("overlay").unwrap();
    assert_eq!((overlay.x, overlay.y), (5, 4));
    assert_eq!(result.get("flow").unwrap().y, 0);
}
