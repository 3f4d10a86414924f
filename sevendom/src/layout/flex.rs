use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Border, Direction, Display, Justify, Overflow, Position, Size};

/// Resolved rectangles from a layout pass, keyed by element id.
/// Elements with `Display::None` (and anything scrolled fully out of a
/// clipped viewport) have no entry.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

pub fn layout(element: &Element, available: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    if element.display != Display::None {
        layout_element(element, available, &mut result);
    }
    result
}

fn layout_element(element: &Element, available: Rect, result: &mut LayoutResult) {
    if element.position == Position::Absolute {
        let x = element.left.unwrap_or(0).max(0) as u16;
        let y = element.top.unwrap_or(0).max(0) as u16;
        let width = resolve_size(element.width, available.width, element, true);
        let height = resolve_size(element.height, available.height, element, false);
        let rect = Rect::new(x, y, width, height);
        result.insert(element.id.clone(), rect);
        layout_children(element, rect, result);
        return;
    }

    let margin = &element.margin;
    let after_margin = available.shrink(margin.top, margin.right, margin.bottom, margin.left);

    let width = resolve_size(element.width, after_margin.width, element, true);
    let height = resolve_size(element.height, after_margin.height, element, false);
    let rect = Rect::new(after_margin.x, after_margin.y, width, height);
    result.insert(element.id.clone(), rect);

    layout_children(element, rect, result);
}

fn layout_children(element: &Element, rect: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    let flow_children: Vec<_> = children
        .iter()
        .filter(|c| c.display != Display::None && c.position != Position::Absolute)
        .collect();
    let absolute_children: Vec<_> = children
        .iter()
        .filter(|c| c.display != Display::None && c.position == Position::Absolute)
        .collect();

    if flow_children.is_empty() && absolute_children.is_empty() {
        return;
    }

    let border_size = if element.style.border == Border::None {
        0
    } else {
        1
    };

    let inner = rect.shrink(
        element.padding.top + border_size,
        element.padding.right + border_size,
        element.padding.bottom + border_size,
        element.padding.left + border_size,
    );

    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // First pass: fixed sizes and flex item count.
    let mut fixed_total = 0u16;
    let mut flex_count = 0u16;
    let gap_total = element.gap * flow_children.len().saturating_sub(1) as u16;

    for child in &flow_children {
        let child_margin_main = if is_row {
            child.margin.horizontal_total()
        } else {
            child.margin.vertical_total()
        };

        let child_main_size = if is_row { child.width } else { child.height };
        match child_main_size {
            Size::Fixed(n) => fixed_total = fixed_total.saturating_add(n + child_margin_main),
            Size::Auto => {
                fixed_total = fixed_total
                    .saturating_add(constrained_main(child, is_row) + child_margin_main);
            }
            Size::Fill => flex_count += 1,
            Size::Percent(p) => {
                fixed_total =
                    fixed_total.saturating_add((main_size as f32 * p) as u16 + child_margin_main);
            }
        }
    }

    let remaining = main_size.saturating_sub(fixed_total + gap_total);
    let flex_size = if flex_count > 0 {
        remaining / flex_count
    } else {
        0
    };

    // Resolve main-axis sizes (with min/max clamps).
    let mut child_sizes: Vec<(u16, u16, u16)> = Vec::with_capacity(flow_children.len());
    let mut total_child_size = 0u16;

    for child in &flow_children {
        let (margin_before, margin_after) = if is_row {
            (child.margin.left, child.margin.right)
        } else {
            (child.margin.top, child.margin.bottom)
        };

        let child_main_size = if is_row { child.width } else { child.height };
        let main = match child_main_size {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => flex_size,
            Size::Percent(p) => (main_size as f32 * p) as u16,
        };
        let main = clamp_main(child, is_row, main);

        child_sizes.push((main, margin_before, margin_after));
        total_child_size =
            total_child_size.saturating_add(main + margin_before + margin_after);
    }

    let total_with_gaps = total_child_size.saturating_add(gap_total);
    let extra_space = main_size.saturating_sub(total_with_gaps);

    let (start_offset, between_gap) = match element.justify {
        Justify::Start => (0, element.gap),
        Justify::End => (extra_space, element.gap),
        Justify::Center => (extra_space / 2, element.gap),
        Justify::SpaceBetween => {
            if flow_children.len() > 1 {
                (
                    0,
                    extra_space / (flow_children.len() - 1) as u16 + element.gap,
                )
            } else {
                (0, element.gap)
            }
        }
    };

    // Scrolled containers shift flow children along the main axis.
    let scroll_main = if scrolls(element) {
        if is_row {
            element.scroll_offset.0 as i32
        } else {
            element.scroll_offset.1 as i32
        }
    } else {
        0
    };

    // Second pass: place flow children.
    let mut offset = start_offset as i32 - scroll_main;

    for (i, child) in flow_children.iter().enumerate() {
        let (main, margin_before, margin_after) = child_sizes[i];

        let (cross_margin_before, cross_margin_after) = if is_row {
            (child.margin.top, child.margin.bottom)
        } else {
            (child.margin.left, child.margin.right)
        };

        let child_cross_size = if is_row { child.height } else { child.width };
        let available_cross = cross_size.saturating_sub(cross_margin_before + cross_margin_after);

        let cross = match child_cross_size {
            Size::Fixed(n) => n,
            Size::Fill => available_cross,
            Size::Auto => {
                if element.align == Align::Stretch {
                    available_cross
                } else {
                    estimate_size(child, !is_row).min(available_cross)
                }
            }
            Size::Percent(p) => (cross_size as f32 * p) as u16,
        };
        let cross = clamp_cross(child, is_row, cross).min(available_cross);

        let cross_offset = match element.align {
            Align::Start | Align::Stretch => cross_margin_before,
            Align::Center => cross_margin_before + available_cross.saturating_sub(cross) / 2,
            Align::End => cross_margin_before + available_cross.saturating_sub(cross),
        };

        let main_start = offset + margin_before as i32;
        let main_end = main_start + main as i32;
        offset = main_end + margin_after as i32 + between_gap as i32;

        // Fully scrolled out: no rect, subtree untouched.
        if main_end <= 0 {
            continue;
        }
        let clipped_start = main_start.max(0) as u16;
        let visible_main = (main_end - main_start.max(0)) as u16;

        let child_rect = if is_row {
            Rect::new(
                inner.x + clipped_start,
                inner.y + cross_offset,
                visible_main.min(inner.width.saturating_sub(clipped_start)),
                cross,
            )
        } else {
            Rect::new(
                inner.x + cross_offset,
                inner.y + clipped_start,
                cross,
                visible_main.min(inner.height.saturating_sub(clipped_start)),
            )
        };

        if child_rect.is_empty() && main > 0 {
            continue;
        }

        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, result);
    }

    for child in absolute_children {
        layout_element(child, rect, result);
    }
}

fn scrolls(element: &Element) -> bool {
    matches!(element.overflow_y, Overflow::Scroll | Overflow::Auto)
        || matches!(element.overflow_x, Overflow::Scroll | Overflow::Auto)
}

fn clamp_main(child: &Element, is_row: bool, main: u16) -> u16 {
    let (min, max) = if is_row {
        (child.min_width, child.max_width)
    } else {
        (child.min_height, child.max_height)
    };
    let main = min.map_or(main, |m| main.max(m));
    max.map_or(main, |m| main.min(m))
}

fn clamp_cross(child: &Element, is_row: bool, cross: u16) -> u16 {
    let (min, max) = if is_row {
        (child.min_height, child.max_height)
    } else {
        (child.min_width, child.max_width)
    };
    let cross = min.map_or(cross, |m| cross.max(m));
    max.map_or(cross, |m| cross.min(m))
}

fn constrained_main(child: &Element, is_row: bool) -> u16 {
    clamp_main(child, is_row, estimate_size(child, is_row))
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    let base = match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width).min(available),
        Size::Percent(p) => ((available as f32 * p) as u16).min(available),
    };

    let (min, max) = if is_width {
        (element.min_width, element.max_width)
    } else {
        (element.min_height, element.max_height)
    };

    let with_min = min.map_or(base, |m| base.max(m));
    let with_max = max.map_or(with_min, |m| with_min.min(m));

    with_max.min(available)
}

/// Intrinsic (content-driven) size along one axis, before min/max clamps.
/// Used by Auto sizing, scroll clamping and the fieldset slide target.
pub fn estimate_size(element: &Element, is_width: bool) -> u16 {
    if element.display == Display::None {
        return 0;
    }

    let border_size = if element.style.border == Border::None {
        0
    } else {
        2
    };
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Image { source } => {
            // Placeholder frame: one line of source text plus its border.
            if is_width {
                display_width(source) as u16 + 2
            } else {
                3
            }
        }
        Content::Children(children) => {
            let visible: Vec<_> = children
                .iter()
                .filter(|c| c.display != Display::None && c.position != Position::Absolute)
                .collect();
            if visible.is_empty() {
                0
            } else if (element.direction == Direction::Row) == is_width {
                let gap_total = element.gap * (visible.len().saturating_sub(1)) as u16;
                visible
                    .iter()
                    .map(|c| child_estimate(c, is_width))
                    .fold(0u16, u16::saturating_add)
                    .saturating_add(gap_total)
            } else {
                visible
                    .iter()
                    .map(|c| child_estimate(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content_size.saturating_add(padding + border_size)
}

fn child_estimate(child: &Element, is_width: bool) -> u16 {
    let margin = if is_width {
        child.margin.horizontal_total()
    } else {
        child.margin.vertical_total()
    };
    let base = match (is_width, child.width, child.height) {
        (true, Size::Fixed(n), _) => n,
        (false, _, Size::Fixed(n)) => n,
        _ => estimate_size(child, is_width),
    };
    let clamped = if is_width {
        let v = child.min_width.map_or(base, |m| base.max(m));
        child.max_width.map_or(v, |m| v.min(m))
    } else {
        let v = child.min_height.map_or(base, |m| base.max(m));
        child.max_height.map_or(v, |m| v.min(m))
    };
    clamped + margin
}

/// Intrinsic outer height of an element, honoring its max-height clamp.
pub fn intrinsic_height(element: &Element) -> u16 {
    estimate_size(element, false)
}
