// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use std::sync::LazyLock;
use xts_metadata::TestStatus;

pub(crate) static FIXTURES_DIR: LazyLock<Utf8PathBuf> = LazyLock::new(|| {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("xts-runner has a parent directory")
        .join("fixtures")
});

pub(crate) fn project_dir() -> Utf8PathBuf {
    FIXTURES_DIR.join("ohos-project")
}

pub(crate) fn transcript(name: &str) -> String {
    let path = FIXTURES_DIR.join("transcripts").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {path} failed: {err}"))
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct CaseFixture {
    pub(crate) suite: &'static str,
    pub(crate) name: &'static str,
    pub(crate) status: TestStatus,
    pub(crate) elapsed_ms: u64,
}

/// The cases in `transcripts/mmkv.txt`, in the order they appear.
pub(crate) static MMKV_CASES: &[CaseFixture] = &[
    CaseFixture {
        suite: "mmkvTest_arm",
        name: "encodeString",
        status: TestStatus::Passed,
        elapsed_ms: 12,
    },
    CaseFixture {
        suite: "mmkvTest_arm",
        name: "decodeInt",
        status: TestStatus::Failed,
        elapsed_ms: 3,
    },
    CaseFixture {
        suite: "CodecTest",
        name: "roundTrip",
        status: TestStatus::Passed,
        elapsed_ms: 7,
    },
    CaseFixture {
        suite: "CodecTest",
        name: "largeBuffer",
        status: TestStatus::Failed,
        elapsed_ms: 0,
    },
    CaseFixture {
        suite: "CodecTest",
        name: "timeoutCase",
        status: TestStatus::Unknown,
        elapsed_ms: 0,
    },
];
