//! Screenshot popup: the terminal's stand-in for opening the image in a
//! fresh browser window. A double click anywhere in the overlay closes it.

use sevendom::{
    remove_child_by_id, Backdrop, Border, Color, Edges, Element, Event, Position, Size, Style,
};

pub const POPUP_ID: &str = "image-viewer";

#[derive(Debug, Default)]
pub struct ImagePopup {
    open: bool,
}

impl ImagePopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Inject the overlay. Only one popup exists at a time; opening again
    /// replaces the current one.
    pub fn open(&mut self, root: &mut Element, source: &str, width: u16, height: u16) {
        self.close(root);

        let popup_width = (width * 3 / 4).max(20);
        let popup_height = (height * 3 / 4).max(7);
        let left = (width.saturating_sub(popup_width)) / 2;
        let top = (height.saturating_sub(popup_height)) / 2;

        let overlay = Element::col()
            .id(POPUP_ID)
            .position(Position::Absolute)
            .left(left as i16)
            .top(top as i16)
            .z_index(10)
            .width(Size::Fixed(popup_width))
            .height(Size::Fixed(popup_height))
            .backdrop(Backdrop::Dim(0.5))
            .clickable(true)
            .style(
                Style::new()
                    .background(Color::oklch(0.2, 0.02, 250.0))
                    .border(Border::Rounded)
                    .foreground(Color::oklch(0.9, 0.02, 250.0)),
            )
            .padding(Edges::all(1))
            .child(
                Element::image(source)
                    .width(Size::Fill)
                    .height(Size::Fill),
            );

        root.push_child(overlay);
        self.open = true;
    }

    pub fn close(&mut self, root: &mut Element) {
        remove_child_by_id(root, POPUP_ID);
        self.open = false;
    }

    /// While open, the popup owns the pointer: clicks are swallowed and a
    /// double click dismisses it. Returns the consumed events.
    pub fn process_events(&mut self, events: &[Event], root: &mut Element) -> Vec<Event> {
        if !self.open {
            return Vec::new();
        }

        let mut consumed = Vec::new();
        for event in events {
            match event {
                Event::DoubleClick { .. } => {
                    self.close(root);
                    consumed.push(event.clone());
                }
                Event::Click { .. } => consumed.push(event.clone()),
                _ => {}
            }
        }
        consumed
    }
}
