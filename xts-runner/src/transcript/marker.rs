// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of transcript lines.
//!
//! The harness interleaves its status lines with arbitrary device output, so markers are matched
//! anywhere in a line rather than only at the start.

use regex::Regex;
use std::sync::LazyLock;

const TASK_TIME: &str = "OHOS_REPORT_STATUS: taskconsuming";
const SUITE: &str = "OHOS_REPORT_STATUS: class=";
const SUITE_TIME: &str = "OHOS_REPORT_STATUS: suiteconsuming";
const CASE: &str = "OHOS_REPORT_STATUS: test=";
const STATUS_CODE: &str = "OHOS_REPORT_STATUS_CODE:";
const CASE_TIME: &str = "OHOS_REPORT_STATUS: consuming=";
const STACK: &str = "OHOS_REPORT_STATUS: stack=";

static SUITE_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"suiteconsuming=?([0-9]+)").expect("valid regex"));

/// A transcript line, classified by the first marker it contains.
///
/// Markers are checked in a fixed order, so a line is never classified as more than one marker.
/// Timing values that fail to parse are kept as `None`: the line still counts as that marker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Marker<'a> {
    /// `taskconsuming=<n>`: the run-level task time.
    TaskTime(Option<u64>),

    /// A bare `taskconsuming` marker, with the time on the following line.
    TaskTimeOnNextLine,

    /// `class=<name>`: a suite starts.
    Suite(&'a str),

    /// `suiteconsuming=<n>` or `suiteconsuming<n>`, or a bare `suiteconsuming` marker (`None`)
    /// with the time on the following line.
    SuiteTime(Option<u64>),

    /// `test=<name>`: a test case starts.
    Case(&'a str),

    /// `OHOS_REPORT_STATUS_CODE: <code>`.
    StatusCode(&'a str),

    /// `consuming=<n>`: the current case's time.
    CaseTime(Option<u64>),

    /// `stack=<value>`: a stack trace for the current case.
    Stack(&'a str),

    /// Any other line.
    Other,
}

impl<'a> Marker<'a> {
    pub(super) fn classify(line: &'a str) -> Self {
        if line.contains(TASK_TIME) {
            match value_after(line, "taskconsuming=") {
                Some(value) => Self::TaskTime(parse_millis(value)),
                None => Self::TaskTimeOnNextLine,
            }
        } else if let Some(name) = value_after(line, SUITE) {
            Self::Suite(name)
        } else if line.contains(SUITE_TIME) {
            Self::SuiteTime(
                SUITE_TIME_REGEX
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| parse_millis(m.as_str())),
            )
        } else if let Some(name) = value_after(line, CASE) {
            Self::Case(name)
        } else if let Some(code) = value_after(line, STATUS_CODE) {
            Self::StatusCode(code)
        } else if let Some(value) = value_after(line, CASE_TIME) {
            Self::CaseTime(parse_millis(value))
        } else if let Some(value) = value_after(line, STACK) {
            Self::Stack(value)
        } else {
            Self::Other
        }
    }
}

/// Returns the trimmed text between the first occurrence of `key` and the next one (or the end of
/// the line), if `key` is present.
fn value_after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.split(key).nth(1).map(str::trim)
}

fn parse_millis(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

/// Parses a line consisting only of ASCII digits, as used by markers whose value is on the
/// following line.
pub(super) fn parse_bare_millis(line: &str) -> Option<u64> {
    let line = line.trim();
    if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
        line.parse().ok()
    } else {
        None
    }
}
