use std::collections::HashMap;

use crate::element::{Content, Element};
use crate::event::{Event, Key};
use crate::layout::{intrinsic_height, LayoutResult};
use crate::types::{Display, Overflow};

/// Tracks vertical scroll offsets for scrollable elements.
/// Like the other widget states, this is user-managed state that persists
/// across frames; `apply` writes it back into the tree.
#[derive(Debug, Default)]
pub struct ScrollState {
    offsets: HashMap<String, u16>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> u16 {
        self.offsets.get(id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, id: &str, y: u16) {
        self.offsets.insert(id.to_string(), y);
    }

    /// Process events and update offsets. Wheel events scroll the innermost
    /// scrollable under the cursor; paging keys scroll the first scrollable
    /// in the tree. Returns the events that were consumed.
    pub fn process_events(
        &mut self,
        events: &[Event],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        let mut consumed = Vec::new();

        for event in events {
            match event {
                Event::Scroll { x, y, delta_y, .. } => {
                    if let Some(id) = find_scrollable_at(root, layout, *x, *y) {
                        if self.scroll_by(&id, root, layout, *delta_y) {
                            consumed.push(event.clone());
                        }
                    }
                }
                Event::Key { key, modifiers } if modifiers.none() => {
                    let Some(id) = collect_scrollable(root).into_iter().next() else {
                        continue;
                    };
                    let page = layout.get(&id).map(|r| r.height.saturating_sub(1)).unwrap_or(0);
                    let delta = match key {
                        Key::PageDown => page as i16,
                        Key::PageUp => -(page as i16),
                        Key::Down => 1,
                        Key::Up => -1,
                        _ => continue,
                    };
                    if self.scroll_by(&id, root, layout, delta) {
                        consumed.push(event.clone());
                    }
                }
                _ => {}
            }
        }

        consumed
    }

    /// Scroll an element by a delta, clamped to its content height.
    /// Returns true if the offset changed.
    pub fn scroll_by(
        &mut self,
        id: &str,
        root: &Element,
        layout: &LayoutResult,
        delta_y: i16,
    ) -> bool {
        let Some(element) = crate::element::find_element(root, id) else {
            return false;
        };
        let Some(rect) = layout.get(id) else {
            return false;
        };

        let max_scroll = content_height(element).saturating_sub(rect.height);
        let current = self.get(id);
        let new_y = (current as i32 + delta_y as i32).clamp(0, max_scroll as i32) as u16;

        if new_y != current {
            self.offsets.insert(id.to_string(), new_y);
            true
        } else {
            false
        }
    }

    /// Write tracked offsets into the tree.
    pub fn apply(&self, root: &mut Element) {
        for (id, y) in &self.offsets {
            if let Some(el) = crate::element::find_element_mut(root, id) {
                el.scroll_offset = (el.scroll_offset.0, *y);
            }
        }
    }
}

fn content_height(element: &Element) -> u16 {
    let mut total = element.padding.vertical_total();
    if let Content::Children(children) = &element.content {
        let visible: Vec<_> = children
            .iter()
            .filter(|c| c.display != Display::None)
            .collect();
        total += element.gap * visible.len().saturating_sub(1) as u16;
        for child in visible {
            total += intrinsic_height(child).max(match child.height {
                crate::types::Size::Fixed(n) => n,
                _ => 0,
            });
        }
    }
    total
}

/// Find the innermost scrollable element at the given coordinates.
fn find_scrollable_at(root: &Element, layout: &LayoutResult, x: u16, y: u16) -> Option<String> {
    let rect = layout.get(&root.id)?;
    if !rect.contains(x, y) {
        return None;
    }

    if let Content::Children(children) = &root.content {
        for child in children.iter().rev() {
            if let Some(id) = find_scrollable_at(child, layout, x, y) {
                return Some(id);
            }
        }
    }

    if is_scrollable(root) {
        return Some(root.id.clone());
    }

    None
}

fn is_scrollable(element: &Element) -> bool {
    matches!(element.overflow_y, Overflow::Scroll | Overflow::Auto)
}

/// Collect all scrollable element IDs in document order.
pub fn collect_scrollable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_scrollable_recursive(element, &mut result);
    result
}

fn collect_scrollable_recursive(element: &Element, result: &mut Vec<String>) {
    if is_scrollable(element) {
        result.push(element.id.clone());
    }
    if let Content::Children(children) = &element.content {
        for child in children {
            collect_scrollable_recursive(child, result);
        }
    }
}
