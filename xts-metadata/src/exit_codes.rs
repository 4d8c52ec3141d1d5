// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `xts` failures.
///
/// `xts` invocations may fail for a variety of reasons. This structure documents the exit codes
/// that may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum XtsExitCode {}

impl XtsExitCode {
    /// No errors occurred and xts exited normally.
    pub const OK: i32 = 0;

    /// The test root was missing, or no runnable suites were declared in it.
    pub const NO_TESTS_DECLARED: i32 = 4;

    /// One or more libraries had failing, erroring or unreported test cases.
    pub const TEST_RUN_FAILED: i32 = 100;

    /// A transcript could not be read.
    pub const TRANSCRIPT_READ_FAILED: i32 = 104;

    /// Writing a JSON or JUnit report produced an error.
    pub const REPORT_WRITE_FAILED: i32 = 105;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// A user issue happened while setting up an xts invocation, for example an invalid config
    /// file or an unknown profile.
    pub const SETUP_ERROR: i32 = 96;
}
