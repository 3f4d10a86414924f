//! Row visibility toggles for the details table.
//!
//! Stateless, id-driven procedures over the live tree: a testpoint row
//! folds its testcase rows, a testcase row folds its steps zone. Unknown
//! ids are ignored.

use sevendom::{find_element_mut, Display, Element};

pub const TESTPOINT_ID_PREFIX: &str = "testpoint_";
pub const TESTCASE_ID_PREFIX: &str = "testcase_";
pub const ID_SEP: &str = ".";
pub const TESTSTEPS_ROW_ID: &str = "teststeps";

pub const TESTPOINT_ROW_CLASS: &str = "testpoint";
pub const TESTCASE_ROW_CLASS: &str = "testcase";
pub const TESTCASE_SHOW_CLASS: &str = "testcase-show";
pub const TESTCASE_HIDDEN_CLASS: &str = "testcase-hidden";
pub const TESTSTEPS_ROW_CLASS: &str = "teststeps";

/// Flip all testcase rows of a testpoint. Hiding a row also hides its
/// steps zone and swaps the shown/hidden marker classes; showing it does
/// not reopen the steps zone (that takes a click on the row itself).
pub fn toggle_testcases_of_testpoint(
    root: &mut Element,
    testpoint_id: &str,
    testcase_prefix: &str,
    id_sep: &str,
    testcase_count: usize,
) {
    for index in 1..=testcase_count {
        let tc_id = format!("{testpoint_id}{id_sep}{testcase_prefix}{index}");
        let Some(row) = find_element_mut(root, &tc_id) else {
            continue;
        };

        let display = if row.display == Display::None {
            Display::TableRow
        } else {
            Display::None
        };
        row.display = display;

        if display == Display::TableRow {
            row.remove_class(TESTCASE_HIDDEN_CLASS);
            row.add_class(TESTCASE_SHOW_CLASS);
        } else {
            row.remove_class(TESTCASE_SHOW_CLASS);
            row.add_class(TESTCASE_HIDDEN_CLASS);
            let steps_id = format!("{tc_id}{id_sep}{TESTSTEPS_ROW_ID}");
            if let Some(steps) = find_element_mut(root, &steps_id) {
                steps.display = Display::None;
            }
        }
    }
}

/// Flip a steps zone row between hidden and table-row.
pub fn toggle_teststeps_row(root: &mut Element, teststeps_row_id: &str) {
    flip_row(root, teststeps_row_id);
}

/// Flip a single step's details row between hidden and table-row.
pub fn toggle_teststeps_details(root: &mut Element, details_row_id: &str) {
    flip_row(root, details_row_id);
}

fn flip_row(root: &mut Element, id: &str) {
    let Some(row) = find_element_mut(root, id) else {
        return;
    };
    row.display = if row.display == Display::None {
        Display::TableRow
    } else {
        Display::None
    };
}
