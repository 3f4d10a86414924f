use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{
    Align, Backdrop, Direction, Display, Edges, Justify, Overflow, Position, Size, Style,
    TextAlign, TextWrap,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity. Elements are addressed by id; roles are carried by classes,
    // the same way the generated report marks them up.
    pub id: String,
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Layout (box model)
    pub display: Display,
    pub width: Size,
    pub height: Size,
    pub min_width: Option<u16>,
    pub max_width: Option<u16>,
    pub min_height: Option<u16>,
    pub max_height: Option<u16>,
    pub padding: Edges,
    pub margin: Edges,

    // Positioning
    pub position: Position,
    pub top: Option<i16>,
    pub left: Option<i16>,
    pub z_index: i16,

    // Flex container
    pub direction: Direction,
    pub gap: u16,
    pub justify: Justify,
    pub align: Align,

    // Overflow
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub scroll_offset: (u16, u16),

    // Visual
    pub style: Style,
    pub backdrop: Backdrop,

    // Text-specific
    pub text_wrap: TextWrap,
    pub text_align: TextAlign,

    // Interaction
    pub clickable: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            classes: Vec::new(),
            content: Content::None,
            display: Display::Flex,
            width: Size::Auto,
            height: Size::Auto,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            padding: Edges::default(),
            margin: Edges::default(),
            position: Position::Static,
            top: None,
            left: None,
            z_index: 0,
            direction: Direction::Column,
            gap: 0,
            justify: Justify::Start,
            align: Align::Start,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            scroll_offset: (0, 0),
            style: Style::default(),
            backdrop: Backdrop::None,
            text_wrap: TextWrap::NoWrap,
            text_align: TextAlign::Left,
            clickable: false,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    /// A table row: lays out horizontally and reports `Display::TableRow`,
    /// the value row toggles flip against.
    pub fn table_row() -> Self {
        Self {
            id: generate_id("tr"),
            direction: Direction::Row,
            display: Display::TableRow,
            ..Default::default()
        }
    }

    pub fn image(source: impl Into<String>) -> Self {
        Self {
            id: generate_id("img"),
            content: Content::Image {
                source: source.into(),
            },
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    // Class list operations. Duplicates are never stored; removing an
    // absent class is a no-op.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    /// Insert at a position in the class list; past-the-end falls back to
    /// appending, matching the original splice behavior.
    pub fn add_class_at(&mut self, index: usize, class: impl Into<String>) {
        let class = class.into();
        if class.is_empty() || self.has_class(&class) {
            return;
        }
        if index <= self.classes.len() {
            self.classes.insert(index, class);
        } else {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    // Layout
    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn min_width(mut self, min_width: u16) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: u16) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn min_height(mut self, min_height: u16) -> Self {
        self.min_height = Some(min_height);
        self
    }

    pub fn max_height(mut self, max_height: u16) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    // Positioning
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn top(mut self, top: i16) -> Self {
        self.top = Some(top);
        self
    }

    pub fn left(mut self, left: i16) -> Self {
        self.left = Some(left);
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = z_index;
        self
    }

    // Flex container
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    // Overflow
    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow_x = overflow;
        self.overflow_y = overflow;
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = overflow;
        self
    }

    pub fn scroll_offset(mut self, x: u16, y: u16) -> Self {
        self.scroll_offset = (x, y);
        self
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    // Text
    pub fn text_wrap(mut self, text_wrap: TextWrap) -> Self {
        self.text_wrap = text_wrap;
        self
    }

    pub fn text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    // Interaction
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        for child in new_children {
            self.push_child(child);
        }
        self
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    pub fn prepend_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.insert(0, child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> &mut [Element] {
        match &mut self.content {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }
}
