// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{RunSummary, TestSuiteSummary};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Results across several libraries tested one after another.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OverallSummary {
    /// The total number of test cases across all libraries.
    pub total: usize,

    /// The number of test cases that passed.
    pub passed: usize,

    /// The number of test cases that did not pass, including errors.
    pub failed: usize,

    /// The number of libraries tested.
    pub total_libs: usize,

    /// The number of libraries whose runs passed.
    pub passed_libs: usize,

    /// Per-library results, in the order they were added.
    pub libraries: Vec<LibraryResult>,
}

impl OverallSummary {
    /// Returns true if every library passed. Vacuously true if no libraries were tested.
    pub fn all_passed(&self) -> bool {
        self.passed_libs == self.total_libs
    }
}

/// The result of testing one library.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibraryResult {
    /// The library name.
    pub name: String,

    /// Whether the library passed.
    pub status: LibraryStatus,

    /// The run summary for the library.
    pub summary: RunSummary,

    /// Per-suite results for the library.
    pub suites: IndexMap<String, TestSuiteSummary>,
}

/// Whether a library's test run passed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryStatus {
    /// At least one test ran, and all of them passed.
    Passed,

    /// Some test did not pass, or no tests ran at all.
    Failed,
}

impl LibraryStatus {
    /// Computes the status for a run summary.
    pub fn from_summary(summary: &RunSummary) -> Self {
        if summary.is_success() {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}
