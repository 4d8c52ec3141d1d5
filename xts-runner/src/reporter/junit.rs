// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code to generate JUnit XML reports from run results.

use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use std::time::Duration;
use xts_metadata::{RunResult, TestCaseSummary, TestStatus};

static STATUS_NOT_REPORTED: &str = "status not reported";

/// Builds a JUnit report for a run, with one `testsuite` per suite.
///
/// Cases whose status was never reported are recorded as errors rather than failures, so that a
/// truncated transcript can be told apart from a failing test.
pub fn junit_report(report_name: &str, result: &RunResult) -> Report {
    let mut report = Report::new(report_name);
    report.set_time(Duration::from_millis(result.summary.total_elapsed_ms));

    for suite in result.suites.values() {
        let mut test_suite = TestSuite::new(suite.name.as_str());
        test_suite.set_time(Duration::from_millis(suite.elapsed_ms));

        for case in suite.test_cases.values() {
            let mut testcase = TestCase::new(case.name.as_str(), testcase_status(case));
            testcase
                .set_classname(suite.name.as_str())
                .set_time(Duration::from_millis(case.elapsed_ms));
            test_suite.add_test_case(testcase);
        }

        report.add_test_suite(test_suite);
    }

    report
}

fn testcase_status(case: &TestCaseSummary) -> TestCaseStatus {
    let (kind, ty) = match case.status {
        TestStatus::Passed => return TestCaseStatus::success(),
        TestStatus::Failed => (NonSuccessKind::Failure, "test failure"),
        TestStatus::Error => (NonSuccessKind::Error, "test error"),
        TestStatus::Unknown => (NonSuccessKind::Error, STATUS_NOT_REPORTED),
    };

    let mut status = TestCaseStatus::non_success(kind);
    status.set_type(ty);
    if let Some(detail) = &case.error_detail {
        // The first line is the most useful summary; the full detail goes in the description.
        let message = detail.lines().next().unwrap_or_default();
        status
            .set_message(message)
            .set_description(detail.as_str());
    }
    status
}
