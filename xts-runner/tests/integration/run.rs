// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{MMKV_CASES, project_dir, transcript};
use camino_tempfile::Utf8TempDir;
use pretty_assertions::assert_eq;
use xts_metadata::{LibraryStatus, SuiteTimeSource, TotalTimeSource};
use xts_runner::{
    accumulator::RunAccumulator,
    config::XtsConfig,
    reporter::{ReportWriter, ResultDisplayer},
    transcript::extract_test_results,
};

#[test]
fn mmkv_transcript() {
    let result = extract_test_results(&transcript("mmkv.txt"));

    let cases: Vec<_> = result
        .test_cases()
        .map(|(suite, case)| (suite.name.as_str(), case.name.as_str()))
        .collect();
    let expected: Vec<_> = MMKV_CASES
        .iter()
        .map(|fixture| (fixture.suite, fixture.name))
        .collect();
    assert_eq!(cases, expected, "cases in first-seen order");

    for fixture in MMKV_CASES {
        let case = &result.suites[fixture.suite].test_cases[fixture.name];
        assert_eq!(case.status, fixture.status, "status for {}", fixture.name);
        assert_eq!(case.elapsed_ms, fixture.elapsed_ms, "time for {}", fixture.name);
        assert!(case.display_ms >= 1);
    }

    let arm = &result.suites["mmkvTest_arm"];
    assert_eq!((arm.elapsed_ms, arm.elapsed_source), (20, SuiteTimeSource::Reported));
    assert_eq!(
        arm.test_cases["decodeInt"].error_detail.as_deref(),
        Some("Error in decodeInt,AssertException: expect 1 equals 2")
    );

    let codec = &result.suites["CodecTest"];
    assert_eq!((codec.elapsed_ms, codec.elapsed_source), (7, SuiteTimeSource::Derived));
    assert_eq!(
        codec.test_cases["largeBuffer"].error_detail.as_deref(),
        Some("Error in largeBuffer,RangeError: out of memory"),
        "the error line is recorded before the stack and wins"
    );

    let summary = &result.summary;
    assert_eq!(
        (summary.total, summary.passed, summary.failed, summary.error),
        (5, 2, 3, 0)
    );
    assert_eq!(summary.total_elapsed_ms, 245);
    assert_eq!(summary.elapsed_source, TotalTimeSource::TaskTime);
}

#[test]
fn mmkv_with_ci_profile() {
    let store = Utf8TempDir::new().unwrap();
    // Use the fixture's config, but write reports under a temporary directory.
    let config_file = project_dir().join(".config/xts.toml");
    let config = XtsConfig::from_sources(store.path(), Some(config_file.as_path())).unwrap();
    let profile = config.profile("ci").unwrap();

    let result = profile
        .transcript_parser()
        .parse_lossy(transcript("mmkv.txt").as_bytes());
    let summary = &result.summary;
    assert_eq!(
        (summary.total, summary.passed, summary.failed, summary.error),
        (5, 2, 2, 1)
    );

    let writer = ReportWriter::new(&profile);
    let written = writer.write_library(Some("mmkv"), &result).unwrap();
    let store_dir = store.path().join("out/xts/ci/mmkv");
    assert_eq!(
        written,
        vec![store_dir.join("results.json"), store_dir.join("junit.xml")]
    );

    let junit = std::fs::read_to_string(store_dir.join("junit.xml")).unwrap();
    assert!(junit.contains(r#"<testsuites name="mmkv-ci""#), "{junit}");
    assert!(junit.contains(r#"type="status not reported""#), "{junit}");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store_dir.join("results.json")).unwrap())
            .unwrap();
    assert_eq!(json["class-times"]["CodecTest"], 7);
    assert_eq!(json["total-time-ms"], "245ms");
}

#[test]
fn aggregate_libraries() {
    let mut accumulator = RunAccumulator::new();
    accumulator.add_library("mmkv", &extract_test_results(&transcript("mmkv.txt")));
    accumulator.add_library(
        "codec-only",
        &extract_test_results(
            "OHOS_REPORT_STATUS: class=CodecTest\n\
             OHOS_REPORT_STATUS: test=roundTrip\n\
             OHOS_REPORT_STATUS_CODE: 0\n",
        ),
    );
    let overall = accumulator.finish();

    assert_eq!((overall.total, overall.passed, overall.failed), (6, 3, 3));
    assert_eq!((overall.total_libs, overall.passed_libs), (2, 1));
    assert_eq!(overall.libraries[0].status, LibraryStatus::Failed);
    assert_eq!(overall.libraries[1].status, LibraryStatus::Passed);

    let mut buf = Vec::new();
    ResultDisplayer::new(false)
        .write_overall(&overall, &mut buf)
        .unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "  x mmkv    2/5 tests passed\n  \
         + codec-only    1/1 test passed\n\
         1/2 libraries passed, 3/6 tests passed\n"
    );
}
