use std::time::Instant;

use crate::buffer::Buffer;
use crate::element::{Content, Element};
use crate::layout::{estimate_size, LayoutResult, Rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width, wrap_words};
use crate::types::{Backdrop, Border, Display, Overflow, Rgb, TextAlign, TextWrap};

/// A paint item: an element with its effective z_index, tree order and
/// the clip rect inherited from overflow-clipping ancestors.
struct RenderItem<'a> {
    element: &'a Element,
    z_index: i16,
    tree_order: usize,
    clip: Option<Rect>,
}

pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let t0 = Instant::now();

    let mut render_list: Vec<RenderItem> = Vec::new();
    if root.display != Display::None {
        collect_elements(root, layout, &mut render_list, 0, root.z_index, None);
    }

    // Stable sort keeps tree order within a z layer.
    render_list.sort_by_key(|item| (item.z_index, item.tree_order));

    let count = render_list.len();
    for item in render_list {
        paint_element(item.element, layout, buf, item.clip);
    }

    log::debug!(
        "render: {} elements in {:.2}µs",
        count,
        t0.elapsed().as_secs_f64() * 1_000_000.0,
    );
}

fn collect_elements<'a>(
    element: &'a Element,
    layout: &LayoutResult,
    list: &mut Vec<RenderItem<'a>>,
    tree_order: usize,
    parent_z: i16,
    parent_clip: Option<Rect>,
) -> usize {
    let mut order = tree_order;
    let effective_z = element.z_index.max(parent_z);

    let child_clip = if element.overflow_x != Overflow::Visible
        || element.overflow_y != Overflow::Visible
    {
        match layout.get(&element.id) {
            Some(rect) => {
                let inner = inner_rect(element, rect);
                Some(match parent_clip {
                    Some(clip) => inner.intersect(clip),
                    None => inner,
                })
            }
            None => parent_clip,
        }
    } else {
        parent_clip
    };

    list.push(RenderItem {
        element,
        z_index: effective_z,
        tree_order: order,
        clip: parent_clip,
    });
    order += 1;

    if let Content::Children(children) = &element.content {
        for child in children {
            if child.display == Display::None {
                continue;
            }
            order = collect_elements(child, layout, list, order, effective_z, child_clip);
        }
    }

    order
}

fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = if element.style.border == Border::None {
        0
    } else {
        1
    };
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}

fn paint_element(element: &Element, layout: &LayoutResult, buf: &mut Buffer, clip: Option<Rect>) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };

    if let Backdrop::Dim(factor) = element.backdrop {
        dim_buffer(buf, factor);
    }

    let bounds = match clip {
        Some(clip) => rect.intersect(clip),
        None => rect,
    };
    if bounds.is_empty() {
        return;
    }

    if let Some(bg) = &element.style.background {
        let rgb = bg.to_rgb();
        fill_background(buf, bounds, rgb);
    }

    if element.style.border != Border::None {
        draw_border(element, rect, bounds, buf);
    }

    match &element.content {
        Content::Text(text) => draw_text(element, inner_rect(element, rect), bounds, buf, text),
        Content::Image { source } => draw_image_placeholder(element, rect, bounds, buf, source),
        _ => {}
    }

    draw_scrollbar(element, rect, bounds, buf);
}

fn dim_buffer(buf: &mut Buffer, factor: f32) {
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.fg = cell.fg.dim(factor);
                cell.bg = cell.bg.dim(factor);
            }
        }
    }
}

fn fill_background(buf: &mut Buffer, bounds: Rect, rgb: Rgb) {
    for y in bounds.y..bounds.bottom() {
        for x in bounds.x..bounds.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ' ';
                cell.bg = rgb;
                cell.wide_continuation = false;
            }
        }
    }
}

fn border_chars(border: Border) -> (char, char, char, char, char, char) {
    match border {
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        Border::None => (' ', ' ', ' ', ' ', ' ', ' '),
    }
}

fn draw_border(element: &Element, rect: Rect, bounds: Rect, buf: &mut Buffer) {
    draw_frame(element, element.style.border, rect, bounds, buf);
}

fn draw_frame(element: &Element, border: Border, rect: Rect, bounds: Rect, buf: &mut Buffer) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let (tl, tr, bl, br, horiz, vert) = border_chars(border);
    let fg = element.style.foreground.as_ref().map(|c| c.to_rgb());

    let top = rect.y;
    let bottom = rect.bottom() - 1;
    let left = rect.x;
    let right = rect.right() - 1;

    for x in left..=right {
        let ch = if x == left {
            tl
        } else if x == right {
            tr
        } else {
            horiz
        };
        put_char(buf, bounds, x, top, ch, fg, element);
        let ch = if x == left {
            bl
        } else if x == right {
            br
        } else {
            horiz
        };
        put_char(buf, bounds, x, bottom, ch, fg, element);
    }
    for y in top + 1..bottom {
        put_char(buf, bounds, left, y, vert, fg, element);
        put_char(buf, bounds, right, y, vert, fg, element);
    }
}

fn draw_text(element: &Element, inner: Rect, bounds: Rect, buf: &mut Buffer, text: &str) {
    if inner.is_empty() {
        return;
    }
    let fg = element.style.foreground.as_ref().map(|c| c.to_rgb());
    let width = inner.width as usize;

    let lines: Vec<String> = match element.text_wrap {
        TextWrap::Wrap => wrap_words(text, width),
        TextWrap::Truncate => text
            .lines()
            .map(|l| truncate_to_width(l, width))
            .collect(),
        TextWrap::NoWrap => text.lines().map(str::to_string).collect(),
    };

    for (row, line) in lines.iter().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }
        let offset = align_offset(display_width(line), width, element.text_align) as u16;
        let mut x = inner.x + offset;
        for ch in line.chars() {
            let w = char_width(ch).max(1) as u16;
            if x + w > inner.right() {
                break;
            }
            put_char(buf, bounds, x, y, ch, fg, element);
            if w == 2 {
                if let Some(cell) = cell_in_bounds(buf, bounds, x + 1, y) {
                    cell.wide_continuation = true;
                }
            }
            x += w;
        }
    }
}

fn draw_image_placeholder(
    element: &Element,
    rect: Rect,
    bounds: Rect,
    buf: &mut Buffer,
    source: &str,
) {
    // Terminals can't show the bitmap; frame the source path instead.
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let fg = element.style.foreground.as_ref().map(|c| c.to_rgb());
    draw_frame(element, Border::Single, rect, bounds, buf);

    let left = rect.x;
    let right = rect.right() - 1;
    let label_width = rect.width.saturating_sub(2) as usize;
    let label = truncate_to_width(source, label_width);
    let y = rect.y + rect.height / 2;
    let offset = align_offset(display_width(&label), label_width, TextAlign::Center) as u16;
    let mut x = left + 1 + offset;
    for ch in label.chars() {
        let w = char_width(ch).max(1) as u16;
        if x + w > right {
            break;
        }
        put_char(buf, bounds, x, y, ch, fg, element);
        x += w;
    }
}

fn draw_scrollbar(element: &Element, rect: Rect, bounds: Rect, buf: &mut Buffer) {
    if !matches!(element.overflow_y, Overflow::Scroll | Overflow::Auto) || rect.height < 2 {
        return;
    }
    let content_height = estimate_size(element, false);
    if content_height <= rect.height {
        return;
    }

    let track_x = rect.right().saturating_sub(1);
    let viewport = rect.height as u32;
    let content = content_height as u32;
    let max_scroll = content.saturating_sub(viewport).max(1);
    let scroll = (element.scroll_offset.1 as u32).min(max_scroll);

    let thumb_height = ((viewport * viewport / content).max(1) as u16).min(rect.height);
    let travel = rect.height - thumb_height;
    let thumb_top = rect.y + ((scroll * travel as u32) / max_scroll) as u16;

    for y in rect.y..rect.bottom() {
        let ch = if y >= thumb_top && y < thumb_top + thumb_height {
            '█'
        } else {
            '│'
        };
        put_char(buf, bounds, track_x, y, ch, None, element);
    }
}

fn put_char(
    buf: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    ch: char,
    fg: Option<Rgb>,
    element: &Element,
) {
    if let Some(cell) = cell_in_bounds(buf, bounds, x, y) {
        cell.char = ch;
        cell.wide_continuation = false;
        cell.style = element.style.text_style;
        if let Some(fg) = fg {
            cell.fg = fg;
        }
    }
}

fn cell_in_bounds<'a>(
    buf: &'a mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
) -> Option<&'a mut crate::buffer::Cell> {
    if !bounds.contains(x, y) {
        return None;
    }
    buf.get_mut(x, y)
}
