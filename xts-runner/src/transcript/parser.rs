// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    UnknownStatusPolicy,
    marker::{Marker, parse_bare_millis},
};
use indexmap::IndexMap;
use std::iter;
use tracing::debug;
use xts_metadata::{
    RunResult, RunSummary, SuiteTimeSource, TestCaseSummary, TestStatus, TestSuiteSummary,
    TotalTimeSource,
};

/// Parses harness transcripts into [`RunResult`]s.
///
/// Parsing never fails: lines that don't match a marker, or whose marker doesn't apply in the
/// current state, are ignored.
#[derive(Clone, Debug, Default)]
pub struct TranscriptParser {
    unknown_status: UnknownStatusPolicy,
}

impl TranscriptParser {
    /// Creates a new parser with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how cases without a reported status are counted in the run summary.
    pub fn with_unknown_status(mut self, policy: UnknownStatusPolicy) -> Self {
        self.unknown_status = policy;
        self
    }

    /// Parses a transcript.
    pub fn parse(&self, transcript: &str) -> RunResult {
        let lines: Vec<&str> = transcript.split('\n').collect();
        let next_lines = lines.iter().skip(1).copied().map(Some).chain(iter::once(None));

        let state = lines
            .iter()
            .copied()
            .zip(next_lines)
            .fold(ParseState::default(), |state, (line, next_line)| {
                state.step(line, next_line)
            });
        let result = state.finish(self.unknown_status);

        debug!(
            "parsed transcript: {} suites, {} cases, {} passed, total time {}ms ({:?})",
            result.suites.len(),
            result.summary.total,
            result.summary.passed,
            result.summary.total_elapsed_ms,
            result.summary.elapsed_source,
        );
        result
    }

    /// Parses a transcript that may not be valid UTF-8. Invalid sequences are replaced with
    /// U+FFFD rather than rejected.
    pub fn parse_lossy(&self, transcript: &[u8]) -> RunResult {
        self.parse(&String::from_utf8_lossy(transcript))
    }
}

/// The state threaded through a single pass over transcript lines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct ParseState {
    task_time_ms: u64,
    suites: IndexMap<String, SuiteBuilder>,
    // Indexes into `suites` and the current suite's `cases`.
    current_suite: Option<usize>,
    current_case: Option<usize>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct SuiteBuilder {
    reported_ms: u64,
    cases: IndexMap<String, CaseBuilder>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct CaseBuilder {
    status: TestStatus,
    elapsed_ms: u64,
    error_detail: Option<String>,
    // Set by an `Error in` line. A later passing status code doesn't clear it.
    error_line_seen: bool,
}

impl Default for CaseBuilder {
    fn default() -> Self {
        Self {
            status: TestStatus::Unknown,
            elapsed_ms: 0,
            error_detail: None,
            error_line_seen: false,
        }
    }
}

impl ParseState {
    /// Applies one line to the state. `next_line` is consulted by markers whose value may be on
    /// the following line, and by error lines.
    pub(super) fn step(mut self, line: &str, next_line: Option<&str>) -> Self {
        match Marker::classify(line) {
            Marker::TaskTime(value) => {
                if let Some(ms) = value {
                    self.task_time_ms = ms;
                }
            }
            Marker::TaskTimeOnNextLine => {
                if let Some(ms) = next_line.and_then(parse_bare_millis) {
                    self.task_time_ms = ms;
                }
            }
            Marker::Suite(name) => {
                let idx = match self.suites.get_index_of(name) {
                    Some(idx) => idx,
                    None => {
                        self.suites
                            .insert_full(name.to_owned(), SuiteBuilder::default())
                            .0
                    }
                };
                self.current_suite = Some(idx);
                self.current_case = None;
            }
            Marker::SuiteTime(value) => {
                let ms = value.or_else(|| next_line.and_then(parse_bare_millis));
                if let (Some(suite), Some(ms)) = (self.current_suite_mut(), ms) {
                    suite.reported_ms = ms;
                }
            }
            Marker::Case(name) => {
                if let Some(idx) = self.current_suite {
                    let suite = &mut self.suites[idx];
                    let case_idx = match suite.cases.get_index_of(name) {
                        Some(case_idx) => case_idx,
                        None => {
                            suite
                                .cases
                                .insert_full(name.to_owned(), CaseBuilder::default())
                                .0
                        }
                    };
                    self.current_case = Some(case_idx);
                }
            }
            Marker::StatusCode(code) => {
                if let Some((_, case)) = self.current_case_mut() {
                    match code {
                        "0" if !case.error_line_seen => case.status = TestStatus::Passed,
                        "-1" => case.status = TestStatus::Failed,
                        // 1 marks a case starting; other codes carry no verdict.
                        _ => {}
                    }
                }
            }
            Marker::CaseTime(value) => {
                if let (Some((_, case)), Some(ms)) = (self.current_case_mut(), value) {
                    case.elapsed_ms = ms;
                }
            }
            Marker::Stack(value) => {
                // An error line takes precedence, and the first error recorded wins.
                if let Some((name, case)) = self.current_case_mut()
                    && !record_error_line(&name, case, line, next_line)
                    && !value.is_empty()
                    && value != "undefined"
                    && case.error_detail.is_none()
                {
                    case.error_detail = Some(format!("Error in {name},{value}"));
                }
            }
            Marker::Other => {
                if let Some((name, case)) = self.current_case_mut() {
                    record_error_line(&name, case, line, next_line);
                }
            }
        }
        self
    }

    fn current_suite_mut(&mut self) -> Option<&mut SuiteBuilder> {
        self.current_suite.map(|idx| &mut self.suites[idx])
    }

    /// Returns the current case along with its name.
    fn current_case_mut(&mut self) -> Option<(String, &mut CaseBuilder)> {
        let case_idx = self.current_case?;
        let suite = self.current_suite_mut()?;
        let (name, case) = suite.cases.get_index_mut(case_idx)?;
        Some((name.clone(), case))
    }

    /// Consumes the state, producing the final result.
    pub(super) fn finish(self, unknown_status: UnknownStatusPolicy) -> RunResult {
        let task_time_ms = self.task_time_ms;
        let reported_suite_ms =
            saturating_sum(self.suites.values().map(|suite| suite.reported_ms));

        let suites: IndexMap<_, _> = self
            .suites
            .into_iter()
            .map(|(name, suite)| {
                let test_cases: IndexMap<_, _> = suite
                    .cases
                    .into_iter()
                    .map(|(case_name, case)| {
                        // Error detail is only kept for cases that didn't pass.
                        let status = case.status;
                        let error_detail =
                            case.error_detail.filter(|_| status != TestStatus::Passed);
                        let summary = TestCaseSummary::new(
                            case_name.clone(),
                            status,
                            case.elapsed_ms,
                            error_detail,
                        );
                        (case_name, summary)
                    })
                    .collect();
                let (elapsed_ms, elapsed_source) = if suite.reported_ms > 0 {
                    (suite.reported_ms, SuiteTimeSource::Reported)
                } else {
                    let sum = saturating_sum(test_cases.values().map(|case| case.elapsed_ms));
                    (sum, SuiteTimeSource::Derived)
                };
                let summary = TestSuiteSummary {
                    name: name.clone(),
                    elapsed_ms,
                    elapsed_source,
                    test_cases,
                };
                (name, summary)
            })
            .collect();

        let case_ms = saturating_sum(
            suites
                .values()
                .flat_map(|suite| suite.test_cases.values())
                .map(|case| case.elapsed_ms),
        );
        let (total_elapsed_ms, elapsed_source) = if task_time_ms > 0 {
            (task_time_ms, TotalTimeSource::TaskTime)
        } else if reported_suite_ms > 0 {
            (reported_suite_ms, TotalTimeSource::SuiteSum)
        } else if case_ms > 0 {
            (case_ms, TotalTimeSource::CaseSum)
        } else {
            (0, TotalTimeSource::Unavailable)
        };

        let mut summary = RunSummary {
            total_elapsed_ms,
            elapsed_source,
            ..RunSummary::default()
        };
        for case in suites.values().flat_map(|suite| suite.test_cases.values()) {
            summary.total += 1;
            match (case.status, unknown_status) {
                (TestStatus::Passed, _) => summary.passed += 1,
                (_, UnknownStatusPolicy::FoldIntoFailed) | (TestStatus::Failed, _) => {
                    summary.failed += 1
                }
                (TestStatus::Error | TestStatus::Unknown, UnknownStatusPolicy::Separate) => {
                    summary.error += 1
                }
            }
        }

        RunResult { suites, summary }
    }
}

fn saturating_sum(times: impl Iterator<Item = u64>) -> u64 {
    times.fold(0, u64::saturating_add)
}

/// Records an `Error in <case>` line as the case's error detail, marking the case failed.
///
/// The detail is taken from the following line if it has any content. Returns true if the line
/// was an error line.
fn record_error_line(
    case_name: &str,
    case: &mut CaseBuilder,
    line: &str,
    next_line: Option<&str>,
) -> bool {
    if !(line.contains("Error in") && line.contains(case_name)) {
        return false;
    }

    let detail = next_line.map(str::trim).unwrap_or_default();
    case.error_detail = Some(if detail.is_empty() {
        line.trim().to_owned()
    } else {
        format!("Error in {case_name},{detail}")
    });
    case.status = TestStatus::Failed;
    case.error_line_seen = true;
    true
}
