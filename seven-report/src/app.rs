//! Page initialization and the event loop.
//!
//! One widget instance per section family, owned here rather than living
//! as page globals: args, kwargs, traceback, extra info and screenshots
//! each adopt only the containers whose title carries their marker class.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use sevendom::fieldset::{FIELDSET_ITEM_CLASS, FIELDSET_TITLE_CLASS};
use sevendom::{
    child_with_class, find_element, Content, Element, Event, EventTranslator, FieldsetSettings,
    FieldsetState, Key, LayoutResult, ScrollState, Terminal,
};

use crate::builder::{
    build_report, MARKER_ARGS, MARKER_EXTRA_INFO, MARKER_KWARGS, MARKER_SCREENSHOTS,
    MARKER_TRACEBACK, SCREENSHOT_CLASS,
};
use crate::model::TestReport;
use crate::popup::ImagePopup;
use crate::toggles::{
    toggle_testcases_of_testpoint, toggle_teststeps_row, ID_SEP, TESTCASE_ID_PREFIX,
    TESTCASE_ROW_CLASS, TESTPOINT_ID_PREFIX, TESTPOINT_ROW_CLASS, TESTSTEPS_ROW_ID,
};

/// The five named widget instances of the report page.
pub struct Fieldsets {
    pub args: FieldsetState,
    pub kwargs: FieldsetState,
    pub traceback: FieldsetState,
    pub extra_info: FieldsetState,
    pub screenshots: FieldsetState,
}

impl Fieldsets {
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FieldsetState> {
        [
            &mut self.args,
            &mut self.kwargs,
            &mut self.traceback,
            &mut self.extra_info,
            &mut self.screenshots,
        ]
        .into_iter()
    }

    pub fn animating(&self) -> bool {
        self.args.animating()
            || self.kwargs.animating()
            || self.traceback.animating()
            || self.extra_info.animating()
            || self.screenshots.animating()
    }
}

/// Accept only containers whose item > title holds a child carrying the
/// marker class.
fn marker_filter(marker: &'static str) -> impl Fn(&Element) -> bool {
    move |container| {
        container.child_elements().iter().any(|item| {
            item.has_class(FIELDSET_ITEM_CLASS)
                && child_with_class(item, FIELDSET_TITLE_CLASS)
                    .map(|title| child_with_class(title, marker).is_some())
                    .unwrap_or(false)
        })
    }
}

fn wire_fieldset(root: &mut Element, icon: &str, marker: &'static str) -> FieldsetState {
    let mut fieldset = FieldsetState::new(FieldsetSettings::icon(icon));
    let filter = marker_filter(marker);
    fieldset.init(root, Some(&filter));
    fieldset
}

/// Construct the five widget instances against a built report tree.
pub fn wire_fieldsets(root: &mut Element) -> Fieldsets {
    Fieldsets {
        args: wire_fieldset(root, "seven-icon-var-circle", MARKER_ARGS),
        kwargs: wire_fieldset(root, "seven-icon-var-circle", MARKER_KWARGS),
        traceback: wire_fieldset(root, "seven-icon-var", MARKER_TRACEBACK),
        extra_info: wire_fieldset(root, "seven-icon-tips", MARKER_EXTRA_INFO),
        screenshots: wire_fieldset(root, "seven-icon-step", MARKER_SCREENSHOTS),
    }
}

pub struct App {
    root: Element,
    fieldsets: Fieldsets,
    scroll: ScrollState,
    popup: ImagePopup,
    translator: EventTranslator,
    /// testpoint row id -> number of testcase rows under it
    case_counts: HashMap<String, usize>,
}

impl App {
    pub fn new(report: &TestReport, reduced_motion: bool) -> Self {
        let mut root = build_report(report);
        let mut fieldsets = wire_fieldsets(&mut root);
        if reduced_motion {
            for fieldset in fieldsets.iter_mut() {
                fieldset.set_reduced_motion(true);
            }
        }

        let case_counts = report
            .testpoints
            .iter()
            .enumerate()
            .map(|(index, tp)| (format!("{TESTPOINT_ID_PREFIX}{}", index + 1), tp.count()))
            .collect();

        Self {
            root,
            fieldsets,
            scroll: ScrollState::new(),
            popup: ImagePopup::new(),
            translator: EventTranslator::new(),
            case_counts,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn fieldsets(&self) -> &Fieldsets {
        &self.fieldsets
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut term = Terminal::new()?;

        loop {
            term.render(&self.root)?;

            let timeout = if self.fieldsets.animating() {
                Duration::from_millis(16)
            } else {
                Duration::from_millis(100)
            };
            let raw_events = term.poll(Some(timeout))?;
            let events = self.translator.translate(&raw_events, &self.root, term.layout());

            let size = term.size();
            if self.dispatch(&events, term.layout(), size) {
                return Ok(());
            }
            self.tick();
        }
    }

    /// Route one batch of events. Returns true when the app should quit.
    pub fn dispatch(
        &mut self,
        events: &[Event],
        layout: &LayoutResult,
        (width, height): (u16, u16),
    ) -> bool {
        for event in events {
            if let Event::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } = event
            {
                return true;
            }
        }

        // An open popup owns the pointer.
        if self.popup.is_open() {
            self.popup.process_events(events, &mut self.root);
            return false;
        }

        self.scroll.process_events(events, &self.root, layout);
        self.scroll.apply(&mut self.root);

        for fieldset in self.fieldsets.iter_mut() {
            fieldset.process_events(events, &mut self.root);
        }

        for event in events {
            let Event::Click {
                target: Some(target),
                ..
            } = event
            else {
                continue;
            };

            let Some(clicked) = find_element(&self.root, target) else {
                continue;
            };
            let is_testpoint = clicked.has_class(TESTPOINT_ROW_CLASS);
            let is_testcase = clicked.has_class(TESTCASE_ROW_CLASS);
            let screenshot = if clicked.has_class(SCREENSHOT_CLASS) {
                match &clicked.content {
                    Content::Image { source } => Some(source.clone()),
                    _ => None,
                }
            } else {
                None
            };
            let target = target.clone();

            if is_testpoint {
                let count = self.case_counts.get(&target).copied().unwrap_or(0);
                toggle_testcases_of_testpoint(
                    &mut self.root,
                    &target,
                    TESTCASE_ID_PREFIX,
                    ID_SEP,
                    count,
                );
            } else if is_testcase {
                let steps_id = format!("{target}{ID_SEP}{TESTSTEPS_ROW_ID}");
                toggle_teststeps_row(&mut self.root, &steps_id);
            } else if let Some(source) = screenshot {
                self.popup.open(&mut self.root, &source, width, height);
            }
        }

        false
    }

    pub fn tick(&mut self) -> bool {
        let root = &mut self.root;
        let mut animating = false;
        for fieldset in self.fieldsets.iter_mut() {
            animating |= fieldset.tick(root);
        }
        animating
    }
}
