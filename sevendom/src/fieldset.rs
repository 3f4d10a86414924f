//! Collapsible fieldset sections.
//!
//! The report generator emits containers marked with the fieldset class,
//! each holding item/title/content children. A [`FieldsetState`] adopts
//! those sections, decorates titles with a state icon, and toggles the
//! content open or closed with a height slide when a bound event lands on
//! a title (or a delegated child of one).

use std::collections::HashMap;
use std::time::Instant;

use crate::element::{
    child_with_class, collect_by_class, descendant_with_class, find_element, find_element_mut,
    Element,
};
use crate::event::Event;
use crate::transitions::{lerp_u16, Easing, SlideSettings};
use crate::types::{Display, Overflow};

pub const FIELDSET_CLASS: &str = "seven-fieldset";
pub const FIELDSET_ITEM_CLASS: &str = "seven-fieldset-item";
pub const FIELDSET_TITLE_CLASS: &str = "seven-fieldset-title";
pub const FIELDSET_CONTENT_CLASS: &str = "seven-fieldset-content";
pub const FIELDSET_DEFAULT_HIDDEN_CLASS: &str = "seven-fieldset-item-hidden";
/// Marker class carried by every icon element the widget attaches.
pub const ICON_FONT_CLASS: &str = "seveniconfont";

/// Icon configuration: one class for both states, or a distinct pair.
#[derive(Debug, Clone)]
pub enum IconSetting {
    Single(String),
    Pair { show: String, hidden: String },
}

#[derive(Debug, Clone, Default)]
pub struct FieldsetSettings {
    pub icon: Option<IconSetting>,
    pub slide: Option<SlideSettings>,
}

impl FieldsetSettings {
    pub fn icon(icon: impl Into<String>) -> Self {
        Self {
            icon: Some(IconSetting::Single(icon.into())),
            slide: None,
        }
    }

    pub fn icon_pair(show: impl Into<String>, hidden: impl Into<String>) -> Self {
        Self {
            icon: Some(IconSetting::Pair {
                show: show.into(),
                hidden: hidden.into(),
            }),
            slide: None,
        }
    }
}

/// The state a toggle moves a section into, as reported to notifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Show,
    Hidden,
}

impl SectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionState::Show => "show",
            SectionState::Hidden => "hidden",
        }
    }
}

/// One adopted section: the container and its item/title/content triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub container_id: String,
    pub item_id: String,
    pub title_id: String,
    pub content_id: String,
}

/// Events a toggle binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    DoubleClick,
}

/// Where inside a title the toggle binding attaches.
pub enum ChildTarget {
    /// First descendant of the title carrying this class; the title itself
    /// when no such descendant exists.
    Class(String),
    /// Caller-resolved descendant id; the title itself on `None`.
    Resolver(Box<dyn Fn(&Element) -> Option<String>>),
}

pub type Notifier = Box<dyn FnMut(&str, SectionState)>;

#[derive(Default)]
pub struct ToggleOptions {
    /// Restrict the binding to these title ids. All adopted titles otherwise.
    pub titles: Option<Vec<String>>,
    pub child: Option<ChildTarget>,
    /// Called with the title id and target state on every toggle.
    pub notifier: Option<Notifier>,
}

struct Binding {
    /// bound element id -> owning title id
    targets: HashMap<String, String>,
    notifier: Option<Notifier>,
}

#[derive(Debug, Clone, Copy)]
struct Slide {
    from: u16,
    to: u16,
    start: Instant,
    closing: bool,
}

/// Per-page widget state for a family of fieldset sections.
///
/// Owned by the page that created it; several instances can manage
/// disjoint (filtered) section sets in the same tree. Bindings are keyed
/// by trigger, so rebinding a trigger replaces the previous handler
/// rather than stacking a second one.
pub struct FieldsetState {
    icon_show: String,
    icon_hidden: String,
    show_glyph: char,
    hidden_glyph: char,
    slide: SlideSettings,
    reduced_motion: bool,
    sections: Vec<Section>,
    open: HashMap<String, bool>,
    slides: HashMap<String, Slide>,
    bindings: HashMap<Trigger, Binding>,
}

impl FieldsetState {
    /// Resolve the icon configuration. A single class serves both states;
    /// a pair missing one side mirrors the other. No resolvable class
    /// disables icon attachment without disabling toggling.
    pub fn new(settings: FieldsetSettings) -> Self {
        let (mut show, mut hidden) = match settings.icon {
            Some(IconSetting::Single(class)) => (class.clone(), class),
            Some(IconSetting::Pair { show, hidden }) => (show, hidden),
            None => (String::new(), String::new()),
        };
        if show.is_empty() && !hidden.is_empty() {
            show = hidden.clone();
        } else if hidden.is_empty() && !show.is_empty() {
            hidden = show.clone();
        }

        Self {
            icon_show: show,
            icon_hidden: hidden,
            show_glyph: '▼',
            hidden_glyph: '▶',
            slide: settings.slide.unwrap_or_default(),
            reduced_motion: false,
            sections: Vec::new(),
            open: HashMap::new(),
            slides: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn icon_show_class(&self) -> &str {
        &self.icon_show
    }

    pub fn icon_hidden_class(&self) -> &str {
        &self.icon_hidden
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_open(&self, content_id: &str) -> bool {
        self.open.get(content_id).copied().unwrap_or(false)
    }

    pub fn animating(&self) -> bool {
        !self.slides.is_empty()
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Adopt every fieldset container in the tree (optionally restricted by
    /// `filter` over the container element), attach icons, bind the click
    /// toggle and collapse sections pre-marked default-hidden. Re-running
    /// over an overlapping selection is tolerated: known sections are kept,
    /// icons are not duplicated and bindings are replaced.
    pub fn init(
        &mut self,
        root: &mut Element,
        filter: Option<&dyn Fn(&Element) -> bool>,
    ) -> &mut Self {
        let mut adopted = Vec::new();
        for container_id in collect_by_class(root, FIELDSET_CLASS) {
            let Some(container) = find_element(root, &container_id) else {
                continue;
            };
            if let Some(filter) = filter {
                if !filter(container) {
                    continue;
                }
            }
            for item in container.child_elements() {
                if !item.has_class(FIELDSET_ITEM_CLASS) {
                    continue;
                }
                let title = child_with_class(item, FIELDSET_TITLE_CLASS);
                let content = child_with_class(item, FIELDSET_CONTENT_CLASS);
                if let (Some(title), Some(content)) = (title, content) {
                    adopted.push(Section {
                        container_id: container_id.clone(),
                        item_id: item.id.clone(),
                        title_id: title.id.clone(),
                        content_id: content.id.clone(),
                    });
                }
            }
        }

        for section in adopted {
            if self.sections.iter().any(|s| s.item_id == section.item_id) {
                continue;
            }
            let visible = find_element(root, &section.content_id)
                .map(|c| c.display != Display::None)
                .unwrap_or(false);
            self.open.insert(section.content_id.clone(), visible);
            self.sections.push(section);
        }

        self.add_icons(root);
        self.toggle(root, Trigger::Click, ToggleOptions::default());
        self.default_hidden(root, None);
        self
    }

    /// Prepend a state icon to every adopted title whose first child
    /// carries neither icon-state class. Skipped entirely when no icon
    /// class is configured. New icons start in the hidden state.
    fn add_icons(&self, root: &mut Element) {
        if self.icon_show.is_empty() && self.icon_hidden.is_empty() {
            return;
        }

        for section in &self.sections {
            let Some(title) = find_element_mut(root, &section.title_id) else {
                continue;
            };
            let already_marked = title
                .child_elements()
                .first()
                .map(|c| c.has_class(&self.icon_show) || c.has_class(&self.icon_hidden))
                .unwrap_or(false);
            if already_marked {
                continue;
            }
            let icon = Element::text(self.hidden_glyph.to_string())
                .class(ICON_FONT_CLASS)
                .class(self.icon_hidden.clone());
            title.prepend_child(icon);
        }
    }

    /// Bind a trigger to the toggle behavior. Rebinding the same trigger
    /// replaces the previous binding.
    pub fn toggle(&mut self, root: &Element, trigger: Trigger, options: ToggleOptions) {
        let title_ids = options
            .titles
            .unwrap_or_else(|| self.sections.iter().map(|s| s.title_id.clone()).collect());

        let mut targets = HashMap::new();
        for title_id in title_ids {
            let bound = match (&options.child, find_element(root, &title_id)) {
                (Some(ChildTarget::Class(class)), Some(title)) => descendant_with_class(title, class)
                    .map(|el| el.id.clone())
                    .unwrap_or_else(|| title_id.clone()),
                (Some(ChildTarget::Resolver(resolve)), Some(title)) => {
                    resolve(title).unwrap_or_else(|| title_id.clone())
                }
                _ => title_id.clone(),
            };
            targets.insert(bound, title_id);
        }

        self.bindings.insert(
            trigger,
            Binding {
                targets,
                notifier: options.notifier,
            },
        );
    }

    /// Route events into toggles. A click resolves to the nearest bound
    /// ancestor (event bubbling); the matching section then flips. Returns
    /// the consumed events.
    pub fn process_events(&mut self, events: &[Event], root: &mut Element) -> Vec<Event> {
        let mut consumed = Vec::new();

        for event in events {
            let (trigger, target) = match event {
                Event::Click {
                    target: Some(target),
                    ..
                } => (Trigger::Click, target),
                Event::DoubleClick {
                    target: Some(target),
                    ..
                } => (Trigger::DoubleClick, target),
                _ => continue,
            };

            let Some(binding) = self.bindings.get(&trigger) else {
                continue;
            };
            let Some(title_id) = resolve_bound_title(root, &binding.targets, target) else {
                continue;
            };
            let Some(section) = self
                .sections
                .iter()
                .find(|s| s.title_id == title_id)
                .cloned()
            else {
                continue;
            };

            self.toggle_section(root, &section, trigger);
            consumed.push(event.clone());
        }

        consumed
    }

    fn toggle_section(&mut self, root: &mut Element, section: &Section, trigger: Trigger) {
        let opening = !self.is_open(&section.content_id);
        let state = if opening {
            SectionState::Show
        } else {
            SectionState::Hidden
        };

        self.update_icon(root, section, state);
        if let Some(notifier) = self
            .bindings
            .get_mut(&trigger)
            .and_then(|b| b.notifier.as_mut())
        {
            notifier(&section.title_id, state);
        }

        if opening {
            self.slide_open(root, &section.content_id);
        } else {
            self.slide_close(root, &section.content_id);
        }
    }

    fn slide_open(&mut self, root: &mut Element, content_id: &str) {
        let Some(content) = find_element_mut(root, content_id) else {
            return;
        };

        let from = match self.slides.get(content_id) {
            Some(_) => content.max_height.unwrap_or(0),
            None => 0,
        };
        content.display = Display::Flex;
        content.max_height = None;
        let natural = crate::layout::intrinsic_height(content);

        self.open.insert(content_id.to_string(), true);

        if self.reduced_motion || self.slide.duration.is_zero() {
            self.slides.remove(content_id);
            content.overflow_y = Overflow::Visible;
            return;
        }

        content.max_height = Some(from);
        content.overflow_y = Overflow::Hidden;
        self.slides.insert(
            content_id.to_string(),
            Slide {
                from,
                to: natural,
                start: Instant::now(),
                closing: false,
            },
        );
    }

    fn slide_close(&mut self, root: &mut Element, content_id: &str) {
        let Some(content) = find_element_mut(root, content_id) else {
            return;
        };

        let natural = crate::layout::intrinsic_height(content);
        let from = match self.slides.get(content_id) {
            Some(_) => content.max_height.unwrap_or(natural),
            None => natural,
        };

        self.open.insert(content_id.to_string(), false);

        if self.reduced_motion || self.slide.duration.is_zero() {
            self.slides.remove(content_id);
            content.display = Display::None;
            content.max_height = None;
            content.overflow_y = Overflow::Visible;
            return;
        }

        content.max_height = Some(from);
        content.overflow_y = Overflow::Hidden;
        self.slides.insert(
            content_id.to_string(),
            Slide {
                from,
                to: 0,
                start: Instant::now(),
                closing: true,
            },
        );
    }

    /// Advance active slides. Returns true while any slide is still
    /// running, so callers can keep the frame cadence up.
    pub fn tick(&mut self, root: &mut Element) -> bool {
        let now = Instant::now();
        let duration = self.slide.duration;
        let easing: Easing = self.slide.easing;
        let mut finished = Vec::new();

        for (content_id, slide) in &self.slides {
            let t = if duration.is_zero() {
                1.0
            } else {
                (now.duration_since(slide.start).as_secs_f32() / duration.as_secs_f32()).min(1.0)
            };
            let height = lerp_u16(slide.from, slide.to, easing.apply(t));

            let Some(content) = find_element_mut(root, content_id) else {
                finished.push(content_id.clone());
                continue;
            };

            if t >= 1.0 {
                if slide.closing {
                    content.display = Display::None;
                }
                content.max_height = None;
                content.overflow_y = Overflow::Visible;
                finished.push(content_id.clone());
            } else {
                content.max_height = Some(height);
            }
        }

        for id in finished {
            self.slides.remove(&id);
        }

        !self.slides.is_empty()
    }

    /// Collapse the given items — or every adopted item pre-marked with
    /// the default-hidden class — immediately, without animation.
    pub fn default_hidden(&mut self, root: &mut Element, items: Option<&[String]>) {
        let selected: Vec<Section> = match items {
            Some(ids) => self
                .sections
                .iter()
                .filter(|s| ids.contains(&s.item_id))
                .cloned()
                .collect(),
            None => self
                .sections
                .iter()
                .filter(|s| {
                    find_element(root, &s.item_id)
                        .map(|item| item.has_class(FIELDSET_DEFAULT_HIDDEN_CLASS))
                        .unwrap_or(false)
                })
                .cloned()
                .collect(),
        };

        for section in selected {
            self.update_icon(root, &section, SectionState::Hidden);
            self.slides.remove(&section.content_id);
            self.open.insert(section.content_id.clone(), false);
            if let Some(content) = find_element_mut(root, &section.content_id) {
                content.display = Display::None;
                content.max_height = None;
                content.overflow_y = Overflow::Visible;
            }
        }
    }

    /// Move a title's icon (if it has one) into the given state: swap the
    /// state class and the indicator glyph.
    fn update_icon(&self, root: &mut Element, section: &Section, state: SectionState) {
        if self.icon_show.is_empty() && self.icon_hidden.is_empty() {
            return;
        }
        let Some(title) = find_element_mut(root, &section.title_id) else {
            return;
        };
        let Some(icon) = title.child_elements_mut().iter_mut().find(|c| {
            c.has_class(ICON_FONT_CLASS)
                && (c.has_class(&self.icon_show) || c.has_class(&self.icon_hidden))
        }) else {
            return;
        };

        icon.remove_class(&self.icon_show);
        icon.remove_class(&self.icon_hidden);
        let (add, glyph) = match state {
            SectionState::Show => (self.icon_show.clone(), self.show_glyph),
            SectionState::Hidden => (self.icon_hidden.clone(), self.hidden_glyph),
        };
        icon.add_class(add);
        icon.content = crate::element::Content::Text(glyph.to_string());
    }

    /// A bare classed container, ready to receive items.
    pub fn build_container() -> Element {
        Element::col().class(FIELDSET_CLASS)
    }

    /// One classed item/title/content triple. The title is clickable so
    /// hit testing can deliver toggle events to it.
    pub fn build_item() -> SectionParts {
        SectionParts {
            item: Element::col().class(FIELDSET_ITEM_CLASS),
            title: Element::row().class(FIELDSET_TITLE_CLASS).clickable(true),
            content: Element::col().class(FIELDSET_CONTENT_CLASS),
        }
    }
}

/// Building blocks for one section, produced by [`FieldsetState::build_item`].
pub struct SectionParts {
    pub item: Element,
    pub title: Element,
    pub content: Element,
}

impl SectionParts {
    /// Assemble title and content under the item wrapper.
    pub fn assemble(self) -> Element {
        self.item.child(self.title).child(self.content)
    }
}

/// Walk the path from root to `target` and return the title owning the
/// nearest bound element, innermost first.
fn resolve_bound_title(
    root: &Element,
    targets: &HashMap<String, String>,
    target: &str,
) -> Option<String> {
    let mut path = Vec::new();
    if !path_to(root, target, &mut path) {
        return None;
    }
    path.iter()
        .rev()
        .find_map(|id| targets.get(id.as_str()).cloned())
}

fn path_to(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id {
        return true;
    }
    for child in element.child_elements() {
        if path_to(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}
