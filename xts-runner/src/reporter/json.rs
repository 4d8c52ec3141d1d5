// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;
use serde::Serialize;
use xts_metadata::{RunResult, RunSummary, TestStatus};

/// The JSON results file for a single run.
///
/// Suite times are repeated in `class-times` so that consumers interested only in per-suite timing
/// don't need to walk the full results.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct JsonReport<'a> {
    summary: &'a RunSummary,
    class_times: IndexMap<&'a str, u64>,
    test_results: IndexMap<&'a str, JsonSuite<'a>>,
    total_time_ms: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonSuite<'a> {
    suite_time_ms: u64,
    tests: Vec<JsonTestCase<'a>>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct JsonTestCase<'a> {
    name: &'a str,
    status: TestStatus,
    time: String,
    time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_stack: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    /// Builds the report for a run.
    pub fn new(result: &'a RunResult) -> Self {
        let test_results = result
            .suites
            .values()
            .map(|suite| {
                let tests = suite
                    .test_cases
                    .values()
                    .map(|case| JsonTestCase {
                        name: &case.name,
                        status: case.status,
                        time: case.display_time(),
                        time_ms: case.elapsed_ms,
                        error_stack: case.error_detail.as_deref(),
                    })
                    .collect();
                let json_suite = JsonSuite {
                    suite_time_ms: suite.elapsed_ms,
                    tests,
                };
                (suite.name.as_str(), json_suite)
            })
            .collect();

        Self {
            summary: &result.summary,
            class_times: result.suite_times(),
            test_results,
            total_time_ms: format!("{}ms", result.summary.total_elapsed_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::extract_test_results;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn report_shape() {
        let result = extract_test_results(indoc! {"
            OHOS_REPORT_STATUS: class=Foo
            OHOS_REPORT_STATUS: test=bar
            OHOS_REPORT_STATUS_CODE: -1
            OHOS_REPORT_STATUS: stack=SomeError
            OHOS_REPORT_STATUS: test=baz
            OHOS_REPORT_STATUS_CODE: 0
            OHOS_REPORT_STATUS: consuming=7
            OHOS_REPORT_STATUS: suiteconsuming=10
        "});

        let value = serde_json::to_value(JsonReport::new(&result)).unwrap();
        assert_eq!(
            value,
            json!({
                "summary": {
                    "total": 2,
                    "passed": 1,
                    "failed": 1,
                    "error": 0,
                    "ignored": 0,
                    "total-elapsed-ms": 10,
                    "elapsed-source": "suite-sum",
                },
                "class-times": { "Foo": 10 },
                "test-results": {
                    "Foo": {
                        "suite-time-ms": 10,
                        "tests": [
                            {
                                "name": "bar",
                                "status": "failed",
                                "time": "1ms",
                                "time-ms": 0,
                                "error-stack": "Error in bar,SomeError",
                            },
                            {
                                "name": "baz",
                                "status": "passed",
                                "time": "7ms",
                                "time-ms": 7,
                            },
                        ],
                    },
                },
                "total-time-ms": "10ms",
            })
        );
    }
}
