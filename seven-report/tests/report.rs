use seven_report::app::{wire_fieldsets, App};
use seven_report::builder::{build_report, MARKER_ARGS, MARKER_SCREENSHOTS, SCREENSHOT_CLASS};
use seven_report::model::TestReport;
use seven_report::popup::POPUP_ID;
use seven_report::toggles::{
    toggle_testcases_of_testpoint, toggle_teststeps_row, TESTCASE_HIDDEN_CLASS,
    TESTCASE_SHOW_CLASS,
};
use sevendom::{
    collect_by_class, find_element, Display, Element, Event, LayoutResult, MouseButton,
};

fn click(target: &str) -> Event {
    Event::Click {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    }
}

fn double_click(target: &str) -> Event {
    Event::DoubleClick {
        target: Some(target.to_string()),
        x: 0,
        y: 0,
        button: MouseButton::Left,
    }
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_composes_row_ids() {
    let root = build_report(&TestReport::sample());

    assert!(find_element(&root, "testpoint_1").is_some());
    assert!(find_element(&root, "testpoint_1.testcase_1").is_some());
    assert!(find_element(&root, "testpoint_1.testcase_2").is_some());
    assert!(find_element(&root, "testpoint_2.testcase_1").is_some());
    assert!(find_element(&root, "testpoint_1.testcase_1.teststeps").is_some());
}

#[test]
fn test_builder_rows_start_in_expected_state() {
    let root = build_report(&TestReport::sample());

    let case_row = find_element(&root, "testpoint_1.testcase_1").unwrap();
    assert_eq!(case_row.display, Display::TableRow);
    assert!(case_row.has_class("testcase"));
    assert!(case_row.has_class(TESTCASE_SHOW_CLASS));
    assert!(case_row.clickable);

    let steps_row = find_element(&root, "testpoint_1.testcase_1.teststeps").unwrap();
    assert_eq!(steps_row.display, Display::None);
    assert!(steps_row.has_class("teststeps"));
}

#[test]
fn test_builder_emits_marker_classes() {
    let root = build_report(&TestReport::sample());

    // Both cases of the first point have positional arguments.
    assert_eq!(collect_by_class(&root, MARKER_ARGS).len(), 2);
    // Only the failing case attached a screenshot.
    assert_eq!(collect_by_class(&root, MARKER_SCREENSHOTS).len(), 1);
    assert_eq!(collect_by_class(&root, SCREENSHOT_CLASS).len(), 1);
}

// ============================================================================
// Row toggles
// ============================================================================

#[test]
fn test_toggle_testcases_hides_rows_and_steps() {
    let mut root = build_report(&TestReport::sample());

    // Open a steps zone first so hiding the case row also closes it.
    toggle_teststeps_row(&mut root, "testpoint_1.testcase_1.teststeps");
    assert_eq!(
        find_element(&root, "testpoint_1.testcase_1.teststeps")
            .unwrap()
            .display,
        Display::TableRow
    );

    toggle_testcases_of_testpoint(&mut root, "testpoint_1", "testcase_", ".", 2);

    for case in ["testpoint_1.testcase_1", "testpoint_1.testcase_2"] {
        let row = find_element(&root, case).unwrap();
        assert_eq!(row.display, Display::None);
        assert!(row.has_class(TESTCASE_HIDDEN_CLASS));
        assert!(!row.has_class(TESTCASE_SHOW_CLASS));
    }
    assert_eq!(
        find_element(&root, "testpoint_1.testcase_1.teststeps")
            .unwrap()
            .display,
        Display::None
    );
}

#[test]
fn test_toggle_testcases_round_trip_restores_markers() {
    let mut root = build_report(&TestReport::sample());

    toggle_testcases_of_testpoint(&mut root, "testpoint_1", "testcase_", ".", 2);
    toggle_testcases_of_testpoint(&mut root, "testpoint_1", "testcase_", ".", 2);

    let row = find_element(&root, "testpoint_1.testcase_1").unwrap();
    assert_eq!(row.display, Display::TableRow);
    assert!(row.has_class(TESTCASE_SHOW_CLASS));
    assert!(!row.has_class(TESTCASE_HIDDEN_CLASS));

    // Reopening rows does not reopen their steps zones.
    assert_eq!(
        find_element(&root, "testpoint_1.testcase_1.teststeps")
            .unwrap()
            .display,
        Display::None
    );
}

#[test]
fn test_toggle_unknown_id_is_ignored() {
    let mut root = build_report(&TestReport::sample());
    toggle_teststeps_row(&mut root, "no-such-row");
    toggle_testcases_of_testpoint(&mut root, "testpoint_9", "testcase_", ".", 3);
}

// ============================================================================
// Page init
// ============================================================================

#[test]
fn test_wire_fieldsets_partitions_by_marker() {
    let mut root = build_report(&TestReport::sample());
    let fieldsets = wire_fieldsets(&mut root);

    assert_eq!(fieldsets.args.sections().len(), 2);
    assert_eq!(fieldsets.kwargs.sections().len(), 1);
    assert_eq!(fieldsets.traceback.sections().len(), 1);
    // Every steps zone carries a basic-info section.
    assert_eq!(fieldsets.extra_info.sections().len(), 3);
    assert_eq!(fieldsets.screenshots.sections().len(), 1);
}

#[test]
fn test_wire_fieldsets_collapses_default_hidden_sections() {
    let mut root = build_report(&TestReport::sample());
    let fieldsets = wire_fieldsets(&mut root);

    for section in fieldsets.extra_info.sections() {
        let content = find_element(&root, &section.content_id).unwrap();
        assert_eq!(content.display, Display::None);
        assert!(!fieldsets.extra_info.is_open(&section.content_id));
    }
    for section in fieldsets.args.sections() {
        assert!(fieldsets.args.is_open(&section.content_id));
    }
}

// ============================================================================
// App dispatch
// ============================================================================

#[test]
fn test_click_on_testpoint_row_folds_cases() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    app.dispatch(&[click("testpoint_1")], &LayoutResult::new(), (80, 24));

    assert_eq!(
        find_element(app.root(), "testpoint_1.testcase_1")
            .unwrap()
            .display,
        Display::None
    );
}

#[test]
fn test_click_on_testcase_row_opens_steps_zone() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    app.dispatch(
        &[click("testpoint_1.testcase_2")],
        &LayoutResult::new(),
        (80, 24),
    );

    assert_eq!(
        find_element(app.root(), "testpoint_1.testcase_2.teststeps")
            .unwrap()
            .display,
        Display::TableRow
    );
}

#[test]
fn test_click_on_section_title_toggles_it() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    let title_id = app.fieldsets().args.sections()[0].title_id.clone();
    let content_id = app.fieldsets().args.sections()[0].content_id.clone();
    assert!(app.fieldsets().args.is_open(&content_id));

    app.dispatch(&[click(&title_id)], &LayoutResult::new(), (80, 24));

    assert!(!app.fieldsets().args.is_open(&content_id));
    assert_eq!(
        find_element(app.root(), &content_id).unwrap().display,
        Display::None
    );
}

#[test]
fn test_screenshot_click_opens_popup_and_double_click_closes() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    let shot_id = shot_element_id(app.root());
    app.dispatch(&[click(&shot_id)], &LayoutResult::new(), (80, 24));
    assert!(find_element(app.root(), POPUP_ID).is_some());

    app.dispatch(&[double_click(POPUP_ID)], &LayoutResult::new(), (80, 24));
    assert!(find_element(app.root(), POPUP_ID).is_none());
}

#[test]
fn test_open_popup_swallows_clicks() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    let shot_id = shot_element_id(app.root());
    app.dispatch(&[click(&shot_id)], &LayoutResult::new(), (80, 24));

    // With the popup open, a click on a testpoint row does nothing.
    app.dispatch(&[click("testpoint_1")], &LayoutResult::new(), (80, 24));
    assert_eq!(
        find_element(app.root(), "testpoint_1.testcase_1")
            .unwrap()
            .display,
        Display::TableRow
    );
}

#[test]
fn test_quit_keys() {
    let report = TestReport::sample();
    let mut app = App::new(&report, true);

    let quit = Event::Key {
        key: sevendom::Key::Char('q'),
        modifiers: sevendom::Modifiers::new(),
    };
    assert!(app.dispatch(&[quit], &LayoutResult::new(), (80, 24)));
}

fn shot_element_id(root: &Element) -> String {
    collect_by_class(root, SCREENSHOT_CLASS)
        .into_iter()
        .next()
        .expect("sample report has a screenshot")
}
