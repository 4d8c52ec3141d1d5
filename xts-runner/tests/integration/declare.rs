// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::project_dir;
use pretty_assertions::assert_eq;
use xts_runner::{config::XtsConfig, declare::extract_declared_tests, errors::DeclareError};

#[test]
fn declared_suites() {
    let config = XtsConfig::from_sources(project_dir(), None).unwrap();
    let profile = config.profile("ci").unwrap();
    assert_eq!(
        profile.test_root(),
        project_dir().join("entry/src/ohosTest/ets/test")
    );

    let scan = profile.scanner().scan(&profile.test_root()).unwrap();
    assert!(scan.skipped.is_empty(), "skipped: {:?}", scan.skipped);

    let suites = scan.suites;
    assert_eq!(
        suites.declared().iter().collect::<Vec<_>>(),
        ["CodecTest", "mmkvTest_arm"]
    );
    assert_eq!(
        suites.excluded().iter().collect::<Vec<_>>(),
        ["mmkvRootJsunit_x86", "mmkvTest_x86", "mmkvX86ExtraTest"]
    );
    assert_eq!(suites.to_class_arg(), "CodecTest,mmkvTest_arm");
}

#[test]
fn default_scanner_matches_profile() {
    let config = XtsConfig::from_sources(project_dir(), None).unwrap();
    let profile = config.profile(XtsConfig::DEFAULT_PROFILE).unwrap();
    let from_profile = profile.scanner().scan(&profile.test_root()).unwrap();
    let from_default = extract_declared_tests(&profile.test_root()).unwrap();
    assert_eq!(from_profile.suites, from_default.suites);
}

#[test]
fn missing_test_root() {
    let root = project_dir().join("entry/src/test");
    let error = extract_declared_tests(&root).unwrap_err();
    assert!(
        matches!(&error, DeclareError::RootNotFound { root: r } if *r == root),
        "unexpected error: {error:?}"
    );
}
