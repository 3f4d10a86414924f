//! Builds the pre-rendered report tree the behavior layer attaches to:
//! a summary table and a details table of testpoint / testcase /
//! steps-zone rows, with fieldset sections inside each steps zone. Ids
//! and classes follow the generator's scheme so the widgets can find
//! their way around by structure alone.

use sevendom::fieldset::FIELDSET_DEFAULT_HIDDEN_CLASS;
use sevendom::{
    Border, Color, Display, Edges, Element, FieldsetState, Overflow, Size, Style, TextWrap,
};

use crate::model::{NamedValue, TestCase, TestPoint, TestReport, TestResult};
use crate::toggles::{
    ID_SEP, TESTCASE_ID_PREFIX, TESTCASE_ROW_CLASS, TESTCASE_SHOW_CLASS, TESTPOINT_ID_PREFIX,
    TESTPOINT_ROW_CLASS, TESTSTEPS_ROW_CLASS, TESTSTEPS_ROW_ID,
};

pub const REPORT_ROOT_ID: &str = "report";

pub const MARKER_ARGS: &str = "seven-testcase-args";
pub const MARKER_KWARGS: &str = "seven-testcase-kwargs";
pub const MARKER_TRACEBACK: &str = "seven-testcase-traceback";
pub const MARKER_EXTRA_INFO: &str = "seven-testcase-extra-info";
pub const MARKER_SCREENSHOTS: &str = "seven-testcase-screenshots";

pub const SCREENSHOT_CLASS: &str = "screenshot-of-test-failure";
pub const INFO_LAYER_CLASS: &str = "testcase-show-info-layer";

const LABEL_WIDTH: u16 = 16;
const COUNTER_WIDTH: u16 = 8;
const RESULT_WIDTH: u16 = 16;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn build_report(report: &TestReport) -> Element {
    Element::col()
        .id(REPORT_ROOT_ID)
        .width(Size::Fill)
        .height(Size::Fill)
        .overflow_y(Overflow::Auto)
        .style(Style::new().background(Color::oklch(0.15, 0.01, 250.0)))
        .padding(Edges::all(1))
        .gap(1)
        .child(summary_table(report))
        .child(details_table(report))
}

fn summary_table(report: &TestReport) -> Element {
    let mut table = Element::col()
        .class("seven-table")
        .class("summary")
        .width(Size::Fill)
        .style(
            Style::new()
                .background(Color::oklch(0.2, 0.02, 250.0))
                .border(Border::Rounded),
        )
        .padding(Edges::symmetric(0, 1))
        .child(
            Element::text(report.title.as_str())
                .width(Size::Fill)
                .text_align(sevendom::TextAlign::Center)
                .style(Style::new().bold().foreground(Color::oklch(0.9, 0.05, 250.0))),
        )
        .child(summary_row("task", report.task_number.as_str()))
        .child(summary_row("project", report.project_name.as_str()))
        .child(summary_row("executor", report.executor.as_str()))
        .child(summary_row(
            "started",
            &report.start_time.format(TIME_FORMAT).to_string(),
        ))
        .child(summary_row(
            "finished",
            &report.finish_time.format(TIME_FORMAT).to_string(),
        ));

    if !report.description.is_empty() {
        table.push_child(summary_row("description", report.description.as_str()));
    }
    table.push_child(legend_row(report));
    table
}

fn summary_row(label: &str, value: &str) -> Element {
    Element::row()
        .width(Size::Fill)
        .child(
            Element::text(label)
                .width(Size::Fixed(LABEL_WIDTH))
                .style(Style::new().dim()),
        )
        .child(Element::text(value).width(Size::Fill))
}

/// The status breakdown the original drew as a pie chart, as a legend row.
fn legend_row(report: &TestReport) -> Element {
    let mut row = Element::row().width(Size::Fill).gap(2);
    for result in TestResult::ALL {
        let count = report.count_of(result);
        if count == 0 {
            continue;
        }
        row.push_child(
            Element::text(format!("■ {}: {}", result.label(), count))
                .class(result.css_class())
                .style(Style::new().foreground(result.color())),
        );
    }
    row
}

fn details_table(report: &TestReport) -> Element {
    let mut table = Element::col()
        .class("seven-table")
        .class("details")
        .width(Size::Fill)
        .style(
            Style::new()
                .background(Color::oklch(0.18, 0.015, 250.0))
                .border(Border::Single),
        )
        .child(header_row());

    for (index, tp) in report.testpoints.iter().enumerate() {
        let tp_id = format!("{TESTPOINT_ID_PREFIX}{}", index + 1);
        table.push_child(testpoint_row(tp, &tp_id));
        for (tc_index, tc) in tp.testcases.iter().enumerate() {
            let tc_id = format!("{tp_id}{ID_SEP}{TESTCASE_ID_PREFIX}{}", tc_index + 1);
            let steps_id = format!("{tc_id}{ID_SEP}{TESTSTEPS_ROW_ID}");
            table.push_child(testcase_row(tc, &tc_id));
            table.push_child(teststeps_row(tc, &steps_id));
        }
    }

    table
}

fn header_row() -> Element {
    let titles = [
        "testpoint / testcase",
        "total",
        "pass",
        "fail",
        "block",
        "error",
        "skip",
        "xfail",
        "xpass",
    ];
    let mut row = Element::table_row()
        .width(Size::Fill)
        .style(Style::new().background(Color::oklch(0.3, 0.05, 250.0)).bold());
    for (i, title) in titles.iter().enumerate() {
        let width = if i == 0 {
            Size::Fill
        } else {
            Size::Fixed(COUNTER_WIDTH)
        };
        row.push_child(Element::text(*title).width(width));
    }
    row
}

fn testpoint_row(tp: &TestPoint, tp_id: &str) -> Element {
    let counters = [
        tp.count(),
        tp.count_of(TestResult::Pass),
        tp.count_of(TestResult::Fail),
        tp.count_of(TestResult::Block),
        tp.count_of(TestResult::Error),
        tp.count_of(TestResult::Skip),
        tp.count_of(TestResult::XFail),
        tp.count_of(TestResult::XPass),
    ];

    let mut row = Element::table_row()
        .id(tp_id)
        .class(TESTPOINT_ROW_CLASS)
        .clickable(true)
        .width(Size::Fill)
        .style(Style::new().background(Color::oklch(0.25, 0.04, 250.0)))
        .child(
            Element::text(tp.short_name())
                .width(Size::Fill)
                .text_wrap(TextWrap::Truncate)
                .style(Style::new().bold()),
        );
    for count in counters {
        row.push_child(Element::text(count.to_string()).width(Size::Fixed(COUNTER_WIDTH)));
    }
    row
}

fn testcase_row(tc: &TestCase, tc_id: &str) -> Element {
    let duration = if tc.duration_secs > 0.0 {
        format!("{:.2}s", tc.duration_secs)
    } else {
        String::new()
    };

    Element::table_row()
        .id(tc_id)
        .class(TESTCASE_ROW_CLASS)
        .class(TESTCASE_SHOW_CLASS)
        .clickable(true)
        .width(Size::Fill)
        .child(
            Element::text(tc.name.as_str())
                .width(Size::Fill)
                .text_wrap(TextWrap::Truncate)
                .padding(Edges::horizontal(2)),
        )
        .child(
            Element::text(tc.result.label())
                .class(tc.result.css_class())
                .width(Size::Fixed(RESULT_WIDTH))
                .style(Style::new().bold().foreground(tc.result.color())),
        )
        .child(Element::text(duration).width(Size::Fixed(COUNTER_WIDTH)))
}

/// The collapsed zone under a testcase row, holding its fieldset sections.
/// Starts hidden; a click on the testcase row flips it.
fn teststeps_row(tc: &TestCase, steps_id: &str) -> Element {
    let mut layer = Element::col()
        .class(INFO_LAYER_CLASS)
        .width(Size::Fill)
        .padding(Edges::symmetric(0, 2));

    if !tc.args.is_empty() {
        layer.push_child(fieldset_section(
            "positional arguments",
            MARKER_ARGS,
            false,
            tc.args.iter().map(named_value_block).collect(),
        ));
    }
    if !tc.kwargs.is_empty() {
        layer.push_child(fieldset_section(
            "keyword arguments",
            MARKER_KWARGS,
            false,
            tc.kwargs.iter().map(named_value_block).collect(),
        ));
    }

    let mut messages = Vec::new();
    if !tc.output_message.is_empty() {
        messages.push(tc.output_message.as_str());
    }
    if !tc.error_message.is_empty() {
        messages.push(tc.error_message.as_str());
    }
    if !messages.is_empty() {
        layer.push_child(fieldset_section(
            "console output",
            MARKER_TRACEBACK,
            false,
            vec![Element::text(messages.join("\n")).text_wrap(TextWrap::Wrap)],
        ));
    }

    layer.push_child(fieldset_section(
        "basic info",
        MARKER_EXTRA_INFO,
        true,
        extra_info_rows(tc),
    ));

    if let Some(shot) = tc.screenshot.as_ref().filter(|s| s.attached) {
        let content = if shot.message.is_empty() {
            Element::image(shot.source.as_str())
                .class(SCREENSHOT_CLASS)
                .clickable(true)
                .width(Size::Fill)
        } else {
            Element::text(shot.message.as_str())
                .class(SCREENSHOT_CLASS)
                .text_wrap(TextWrap::Wrap)
        };
        layer.push_child(fieldset_section(
            "screenshots",
            MARKER_SCREENSHOTS,
            true,
            vec![content],
        ));
    }

    Element::table_row()
        .id(steps_id)
        .class(TESTSTEPS_ROW_CLASS)
        .display(Display::None)
        .width(Size::Fill)
        .child(layer)
}

fn fieldset_section(
    label: &str,
    marker: &str,
    default_hidden: bool,
    content_children: Vec<Element>,
) -> Element {
    let parts = FieldsetState::build_item();

    let mut item = parts.item.width(Size::Fill);
    if default_hidden {
        item.add_class(FIELDSET_DEFAULT_HIDDEN_CLASS);
    }

    let title = parts
        .title
        .gap(1)
        .child(Element::text(label).class(marker).style(Style::new().bold()));
    let content = parts
        .content
        .width(Size::Fill)
        .padding(Edges::horizontal(2))
        .children(content_children);

    FieldsetState::build_container()
        .width(Size::Fill)
        .child(item.child(title).child(content))
}

fn named_value_block(nv: &NamedValue) -> Element {
    Element::col()
        .width(Size::Fill)
        .child(Element::text(nv.name.as_str()).style(Style::new().dim()))
        .child(
            Element::text(nv.value.as_str())
                .padding(Edges::horizontal(2))
                .text_wrap(TextWrap::Wrap),
        )
}

fn extra_info_rows(tc: &TestCase) -> Vec<Element> {
    let info = &tc.extra_info;
    let editors = info.editors.join(",");
    let pairs = [
        ("author", info.author.as_str()),
        ("editors", editors.as_str()),
        ("last modified by", info.last_modified_by.as_str()),
        ("last modified time", info.last_modified_time.as_str()),
    ];

    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| {
            Element::row()
                .width(Size::Fill)
                .child(
                    Element::text(*label)
                        .width(Size::Fixed(20))
                        .style(Style::new().dim()),
                )
                .child(Element::text(*value).width(Size::Fill).text_wrap(TextWrap::Wrap))
        })
        .collect()
}
