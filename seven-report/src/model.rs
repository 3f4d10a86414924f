//! Data model of a finished test run, as emitted by the report generator.
//! The viewer only reads it; nothing here is written back.

use std::path::Path;

use chrono::{DateTime, Local, TimeDelta};
use serde::{Deserialize, Serialize};
use sevendom::Color;

use crate::error::ReportError;

/// The seven outcome states a testcase can finish in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    Pass,
    Fail,
    Block,
    Error,
    Skip,
    #[serde(rename = "xfail")]
    XFail,
    #[serde(rename = "xpass")]
    XPass,
}

impl TestResult {
    pub const ALL: [TestResult; 7] = [
        TestResult::Pass,
        TestResult::Fail,
        TestResult::Block,
        TestResult::Error,
        TestResult::Skip,
        TestResult::XFail,
        TestResult::XPass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TestResult::Pass => "pass",
            TestResult::Fail => "fail",
            TestResult::Block => "block",
            TestResult::Error => "error",
            TestResult::Skip => "skip",
            TestResult::XFail => "expected failure",
            TestResult::XPass => "unexpected pass",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TestResult::Pass => "success",
            TestResult::Fail => "fail",
            TestResult::Block => "block",
            TestResult::Error => "error",
            TestResult::Skip => "skip",
            TestResult::XFail => "xfail",
            TestResult::XPass => "xpass",
        }
    }

    /// The generator's legend colors.
    pub fn color(self) -> Color {
        match self {
            TestResult::Pass => Color::rgb(0, 128, 0),
            TestResult::Fail => Color::rgb(255, 0, 0),
            TestResult::Block => Color::rgb(244, 164, 96),
            TestResult::Error => Color::rgb(138, 43, 226),
            TestResult::Skip => Color::rgb(192, 192, 192),
            TestResult::XFail => Color::rgb(154, 205, 50),
            TestResult::XPass => Color::rgb(165, 42, 42),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraInfo {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub editors: Vec<String>,
    #[serde(default)]
    pub last_modified_by: String,
    #[serde(default)]
    pub last_modified_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub source: String,
    /// Whether the capture should appear in the report at all.
    #[serde(default)]
    pub attached: bool,
    /// Capture failure text; replaces the image when non-empty.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub method_name: String,
    pub result: TestResult,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub args: Vec<NamedValue>,
    #[serde(default)]
    pub kwargs: Vec<NamedValue>,
    #[serde(default)]
    pub output_message: String,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub extra_info: ExtraInfo,
    #[serde(default)]
    pub screenshot: Option<Screenshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPoint {
    pub name: String,
    pub testcases: Vec<TestCase>,
}

impl TestPoint {
    /// Last dotted segment, the short display name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn count(&self) -> usize {
        self.testcases.len()
    }

    pub fn count_of(&self, result: TestResult) -> usize {
        self.testcases.iter().filter(|tc| tc.result == result).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    pub title: String,
    #[serde(default)]
    pub task_number: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub executor: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Local>,
    pub finish_time: DateTime<Local>,
    pub testpoints: Vec<TestPoint>,
}

impl TestReport {
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ReportError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn count_of(&self, result: TestResult) -> usize {
        self.testpoints.iter().map(|tp| tp.count_of(result)).sum()
    }

    pub fn count(&self) -> usize {
        self.testpoints.iter().map(TestPoint::count).sum()
    }

    /// A small built-in run, shown when no report file is given.
    pub fn sample() -> Self {
        let start = Local::now();
        Self {
            title: "seven test report".to_string(),
            task_number: "T-0001".to_string(),
            project_name: "calculator".to_string(),
            executor: "ci".to_string(),
            description: "nightly regression".to_string(),
            start_time: start,
            finish_time: start + TimeDelta::seconds(42),
            testpoints: vec![
                TestPoint {
                    name: "samples.calculation_test".to_string(),
                    testcases: vec![
                        TestCase {
                            name: "add two numbers".to_string(),
                            method_name: "test_add".to_string(),
                            result: TestResult::Pass,
                            duration_secs: 0.02,
                            args: vec![
                                NamedValue::new("augend", "40"),
                                NamedValue::new("addend", "2"),
                            ],
                            kwargs: vec![NamedValue::new("expected", "42")],
                            output_message: String::new(),
                            error_message: String::new(),
                            extra_info: ExtraInfo {
                                author: "siwenwei".to_string(),
                                ..Default::default()
                            },
                            screenshot: None,
                        },
                        TestCase {
                            name: "divide by zero".to_string(),
                            method_name: "test_div_zero".to_string(),
                            result: TestResult::Fail,
                            duration_secs: 0.11,
                            args: vec![
                                NamedValue::new("dividend", "1"),
                                NamedValue::new("divisor", "0"),
                            ],
                            kwargs: Vec::new(),
                            output_message: "dividing 1 by 0".to_string(),
                            error_message:
                                "ZeroDivisionError: division by zero\n  at calculator.divide"
                                    .to_string(),
                            extra_info: ExtraInfo {
                                author: "siwenwei".to_string(),
                                editors: vec!["wei".to_string()],
                                ..Default::default()
                            },
                            screenshot: Some(Screenshot {
                                source: "screenshots/test_div_zero.png".to_string(),
                                attached: true,
                                message: String::new(),
                            }),
                        },
                    ],
                },
                TestPoint {
                    name: "samples.dependency_test".to_string(),
                    testcases: vec![TestCase {
                        name: "skipped dependency".to_string(),
                        method_name: "test_dependency".to_string(),
                        result: TestResult::Skip,
                        duration_secs: 0.0,
                        args: Vec::new(),
                        kwargs: Vec::new(),
                        output_message: String::new(),
                        error_message: String::new(),
                        extra_info: ExtraInfo::default(),
                        screenshot: None,
                    }],
                },
            ],
        }
    }
}
