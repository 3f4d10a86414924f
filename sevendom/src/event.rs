use std::time::{Duration, Instant};

use crate::element::Element;
use crate::hit::{hit_test, hit_test_any};
use crate::layout::LayoutResult;

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press event
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    /// Mouse click event, targeted at the deepest clickable element
    Click {
        target: Option<String>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Second click on the same cell within the double-click window.
    /// Emitted in addition to the `Click`.
    DoubleClick {
        target: Option<String>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Mouse scroll event, targeted at the element under the cursor
    Scroll {
        target: Option<String>,
        x: u16,
        y: u16,
        delta_y: i16,
    },
    /// Mouse move event (for hover tracking)
    MouseMove { x: u16, y: u16 },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'),
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Turns raw crossterm events into targeted [`Event`]s using hit testing.
/// Holds the timing state needed to synthesize double clicks.
#[derive(Debug, Default)]
pub struct EventTranslator {
    last_click: Option<(Instant, u16, u16, MouseButton)>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(
        &mut self,
        raw: &[crossterm::event::Event],
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<Event> {
        use crossterm::event::{Event as CtEvent, KeyEventKind, MouseEventKind};

        let mut events = Vec::new();

        for event in raw {
            match event {
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    events.push(Event::Key {
                        key: key.code.into(),
                        modifiers: key.modifiers.into(),
                    });
                }
                CtEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(btn) => {
                        let button: MouseButton = btn.into();
                        let (x, y) = (mouse.column, mouse.row);
                        let target = hit_test(layout, root, x, y);
                        events.push(Event::Click {
                            target: target.clone(),
                            x,
                            y,
                            button,
                        });

                        let now = Instant::now();
                        let is_double = matches!(
                            self.last_click,
                            Some((at, lx, ly, lb))
                                if lb == button
                                    && lx == x
                                    && ly == y
                                    && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
                        );
                        if is_double {
                            events.push(Event::DoubleClick {
                                target: hit_test_any(layout, root, x, y),
                                x,
                                y,
                                button,
                            });
                            // A triple click is not two doubles.
                            self.last_click = None;
                        } else {
                            self.last_click = Some((now, x, y, button));
                        }
                    }
                    MouseEventKind::ScrollDown => {
                        events.push(self.scroll_event(root, layout, mouse.column, mouse.row, 2));
                    }
                    MouseEventKind::ScrollUp => {
                        events.push(self.scroll_event(root, layout, mouse.column, mouse.row, -2));
                    }
                    MouseEventKind::Moved => {
                        events.push(Event::MouseMove {
                            x: mouse.column,
                            y: mouse.row,
                        });
                    }
                    _ => {}
                },
                CtEvent::Resize(width, height) => {
                    events.push(Event::Resize {
                        width: *width,
                        height: *height,
                    });
                }
                _ => {}
            }
        }

        events
    }

    fn scroll_event(
        &self,
        root: &Element,
        layout: &LayoutResult,
        x: u16,
        y: u16,
        delta_y: i16,
    ) -> Event {
        Event::Scroll {
            target: hit_test_any(layout, root, x, y),
            x,
            y,
            delta_y,
        }
    }
}
