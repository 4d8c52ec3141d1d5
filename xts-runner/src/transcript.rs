// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing the console transcript of a remote test harness run.
//!
//! The harness prints `OHOS_REPORT_STATUS` lines as suites and cases start and finish, mixed in
//! with arbitrary device output. This module reconstructs a [`RunResult`] from those lines: suites
//! and cases in first-seen order, each case's status, time and error detail, and run-level
//! summary statistics.
//!
//! Timing is reconstructed from whatever the transcript provides. A suite without a reported time
//! gets the sum of its cases' times. The run's total time is the task time if reported, otherwise
//! the sum of reported suite times, otherwise the sum of case times; if none of those are present
//! the total is 0 with [`TotalTimeSource::Unavailable`](xts_metadata::TotalTimeSource).

mod marker;
mod parser;

pub use parser::TranscriptParser;

use serde::Deserialize;
use xts_metadata::RunResult;

/// How cases that were seen but never given a final status are counted in the run summary.
///
/// Either way, such cases keep the [`Unknown`](xts_metadata::TestStatus::Unknown) status in the
/// per-case results, and `total == passed + failed + error` holds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownStatusPolicy {
    /// Count every case that did not pass as failed. The `error` count is always 0.
    #[default]
    FoldIntoFailed,

    /// Count explicitly failed cases as failed, and cases without a final status as errors.
    Separate,
}

/// Parses a transcript with the default settings.
pub fn extract_test_results(transcript: &str) -> RunResult {
    TranscriptParser::new().parse(transcript)
}

/// Parses a transcript that may not be valid UTF-8, with the default settings.
pub fn extract_test_results_lossy(transcript: &[u8]) -> RunResult {
    TranscriptParser::new().parse_lossy(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec, prelude::*};

    fn transcript_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-C]".prop_map(|name| format!("OHOS_REPORT_STATUS: class={name}")),
            "[a-c]".prop_map(|name| format!("OHOS_REPORT_STATUS: test={name}")),
            prop_oneof![Just("0"), Just("-1"), Just("1"), Just("2")]
                .prop_map(|code| format!("OHOS_REPORT_STATUS_CODE: {code}")),
            (0u64..500).prop_map(|ms| format!("OHOS_REPORT_STATUS: consuming={ms}")),
            (0u64..500).prop_map(|ms| format!("OHOS_REPORT_STATUS: suiteconsuming={ms}")),
            (0u64..500).prop_map(|ms| format!("OHOS_REPORT_STATUS: taskconsuming={ms}")),
            prop_oneof![
                Just("OHOS_REPORT_STATUS: taskconsuming".to_owned()),
                Just("OHOS_REPORT_STATUS: suiteconsuming".to_owned()),
                (0u64..500).prop_map(|ms| ms.to_string()),
            ],
            "[a-z ]{0,8}".prop_map(|stack| format!("OHOS_REPORT_STATUS: stack={stack}")),
            "[a-c]".prop_map(|name| format!("Error in {name}")),
            any::<String>(),
        ]
    }

    fn transcript() -> impl Strategy<Value = String> {
        vec(transcript_line(), 0..48).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn proptest_idempotent(transcript in transcript()) {
            prop_assert_eq!(extract_test_results(&transcript), extract_test_results(&transcript));
        }

        #[test]
        fn proptest_summary_consistent(transcript in transcript()) {
            let result = extract_test_results(&transcript);
            let summary = &result.summary;
            prop_assert_eq!(summary.total, result.test_cases().count());
            prop_assert_eq!(summary.total, summary.passed + summary.failed);
            prop_assert_eq!(summary.error, 0);
            prop_assert_eq!(summary.ignored, 0);

            let separate = TranscriptParser::new()
                .with_unknown_status(UnknownStatusPolicy::Separate)
                .parse(&transcript);
            let summary = &separate.summary;
            prop_assert_eq!(summary.total, summary.passed + summary.failed + summary.error);
        }

        #[test]
        fn proptest_timing(transcript in transcript()) {
            let result = extract_test_results(&transcript);
            let any_time = result.suites.values().any(|suite| suite.elapsed_ms > 0)
                || result.test_cases().any(|(_, case)| case.elapsed_ms > 0);
            if any_time {
                prop_assert!(result.summary.total_elapsed_ms > 0);
            }
            for (_, case) in result.test_cases() {
                prop_assert!(case.display_ms >= 1);
                prop_assert_eq!(case.display_ms, case.elapsed_ms.max(1));
            }
        }

        #[test]
        fn proptest_lossy_matches_valid(transcript in transcript()) {
            prop_assert_eq!(
                extract_test_results_lossy(transcript.as_bytes()),
                extract_test_results(&transcript),
            );
        }
    }
}
