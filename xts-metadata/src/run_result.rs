// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The structured result of a single remote test-harness run.
///
/// Produced by parsing the harness transcript. Suites are in the order they were first seen in the
/// transcript.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunResult {
    /// Suites keyed by name.
    pub suites: IndexMap<String, TestSuiteSummary>,

    /// Run-level statistics.
    pub summary: RunSummary,
}

impl RunResult {
    /// Returns the suite with the given name, if it was seen.
    pub fn suite(&self, name: &str) -> Option<&TestSuiteSummary> {
        self.suites.get(name)
    }

    /// Returns an iterator over every test case in the run, along with the suite it belongs to.
    pub fn test_cases(&self) -> impl Iterator<Item = (&TestSuiteSummary, &TestCaseSummary)> + '_ {
        self.suites
            .values()
            .flat_map(|suite| suite.test_cases.values().map(move |case| (suite, case)))
    }

    /// Returns the elapsed time of each suite, keyed by suite name.
    pub fn suite_times(&self) -> IndexMap<&str, u64> {
        self.suites
            .values()
            .map(|suite| (suite.name.as_str(), suite.elapsed_ms))
            .collect()
    }
}

/// A named group of test cases, reported by the harness with a `class=` marker.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestSuiteSummary {
    /// The name of the suite.
    pub name: String,

    /// The elapsed time of the suite, in milliseconds.
    pub elapsed_ms: u64,

    /// Where [`Self::elapsed_ms`] came from.
    pub elapsed_source: SuiteTimeSource,

    /// Test cases keyed by name, in first-seen order.
    pub test_cases: IndexMap<String, TestCaseSummary>,
}

impl TestSuiteSummary {
    /// Returns true if every test case in this suite passed.
    ///
    /// A suite with no test cases is considered passing.
    pub fn all_passed(&self) -> bool {
        self.test_cases.values().all(|case| case.status.is_passed())
    }
}

/// The source of a suite's elapsed time.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuiteTimeSource {
    /// The harness reported the suite time directly.
    Reported,

    /// The harness did not report a suite time, so it is the sum of the suite's test case times.
    Derived,
}

/// A single test function within a suite.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestCaseSummary {
    /// The name of the test case.
    pub name: String,

    /// The status of the test case.
    pub status: TestStatus,

    /// The elapsed time as observed in the transcript, in milliseconds. This may be 0.
    pub elapsed_ms: u64,

    /// The elapsed time used for display: `max(1, elapsed_ms)`.
    ///
    /// A test that genuinely ran in 0ms is shown as 1ms so that "ran" and "never observed" can be
    /// told apart downstream. Sums always use [`Self::elapsed_ms`].
    pub display_ms: u64,

    /// Diagnostic detail, present only for non-passing tests where an error line was seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl TestCaseSummary {
    /// Creates a new test case summary, computing the display time from the observed time.
    pub fn new(
        name: impl Into<String>,
        status: TestStatus,
        elapsed_ms: u64,
        error_detail: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            elapsed_ms,
            display_ms: elapsed_ms.max(1),
            error_detail,
        }
    }

    /// Returns the display time formatted as `<n>ms`.
    pub fn display_time(&self) -> String {
        format!("{}ms", self.display_ms)
    }
}

/// The status of a test case.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStatus {
    /// The harness reported the test as passing (status code `0`).
    Passed,

    /// The harness reported the test as failing (status code `-1`), or an error was seen for it.
    Failed,

    /// The test errored out.
    Error,

    /// The test was seen, but no final status was ever reported for it.
    Unknown,
}

impl TestStatus {
    /// Returns true if this status is [`TestStatus::Passed`].
    pub fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true if the harness explicitly reported a pass or fail.
    pub fn is_reported(self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }

    /// Returns the string form of this status, as used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-level statistics for a [`RunResult`].
///
/// `total == passed + failed + error` always holds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunSummary {
    /// The total number of test cases seen.
    pub total: usize,

    /// The number of test cases that passed.
    pub passed: usize,

    /// The number of test cases counted as failed.
    pub failed: usize,

    /// The number of test cases counted as errors.
    ///
    /// This is always 0 unless unreported statuses are counted separately from failures.
    pub error: usize,

    /// The number of ignored test cases. The harness does not report these, so this is currently
    /// always 0.
    pub ignored: usize,

    /// The total elapsed time of the run, in milliseconds.
    pub total_elapsed_ms: u64,

    /// Where [`Self::total_elapsed_ms`] came from.
    pub elapsed_source: TotalTimeSource,
}

impl RunSummary {
    /// Returns true if at least one test ran, and every test that ran passed.
    pub fn is_success(&self) -> bool {
        self.total > 0 && self.failed == 0 && self.error == 0
    }
}

/// The source of a run's total elapsed time.
///
/// Sources are tried in declaration order, moving on only if the previous one produced 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TotalTimeSource {
    /// The run-level task time reported by the harness.
    TaskTime,

    /// The sum of reported suite times.
    SuiteSum,

    /// The sum of test case times.
    CaseSum,

    /// No timing information was found anywhere in the transcript.
    #[default]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0, 1 ; "zero is floored")]
    #[test_case(1, 1 ; "one")]
    #[test_case(42, 42 ; "unchanged")]
    fn display_floor(elapsed_ms: u64, display_ms: u64) {
        let case = TestCaseSummary::new("bar", TestStatus::Passed, elapsed_ms, None);
        assert_eq!(case.elapsed_ms, elapsed_ms);
        assert_eq!(case.display_ms, display_ms);
        assert_eq!(case.display_time(), format!("{display_ms}ms"));
    }

    #[test_case(TestStatus::Passed, "\"passed\"")]
    #[test_case(TestStatus::Failed, "\"failed\"")]
    #[test_case(TestStatus::Error, "\"error\"")]
    #[test_case(TestStatus::Unknown, "\"unknown\"")]
    fn status_serialization(status: TestStatus, expected: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), expected);
        assert_eq!(format!("\"{status}\""), expected);
    }

    #[test]
    fn run_result_json_shape() {
        let mut suite = TestSuiteSummary {
            name: "Foo".to_owned(),
            elapsed_ms: 0,
            elapsed_source: SuiteTimeSource::Derived,
            test_cases: IndexMap::new(),
        };
        suite.test_cases.insert(
            "bar".to_owned(),
            TestCaseSummary::new("bar", TestStatus::Passed, 0, None),
        );
        let mut result = RunResult::default();
        result.suites.insert("Foo".to_owned(), suite);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "suites": {
                    "Foo": {
                        "name": "Foo",
                        "elapsed-ms": 0,
                        "elapsed-source": "derived",
                        "test-cases": {
                            "bar": {
                                "name": "bar",
                                "status": "passed",
                                "elapsed-ms": 0,
                                "display-ms": 1,
                            }
                        }
                    }
                },
                "summary": {
                    "total": 0,
                    "passed": 0,
                    "failed": 0,
                    "error": 0,
                    "ignored": 0,
                    "total-elapsed-ms": 0,
                    "elapsed-source": "unavailable",
                }
            })
        );

        let roundtrip: RunResult = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, result);
    }

    #[test]
    fn summary_success() {
        let mut summary = RunSummary::default();
        assert!(!summary.is_success(), "an empty run is not a success");
        summary.total = 2;
        summary.passed = 2;
        assert!(summary.is_success());
        summary.passed = 1;
        summary.error = 1;
        assert!(!summary.is_success());
    }
}
