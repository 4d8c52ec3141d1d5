// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Accumulating results across libraries tested one after another.

use tracing::debug;
use xts_metadata::{LibraryResult, LibraryStatus, OverallSummary, RunResult};

/// Collects per-library results into an [`OverallSummary`].
///
/// The accumulator is owned by the caller and passed along as each library's run completes.
#[derive(Clone, Debug, Default)]
pub struct RunAccumulator {
    overall: OverallSummary,
}

impl RunAccumulator {
    /// Creates a new, empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the results of a library's run.
    ///
    /// Libraries are kept in the order they were added. Adding the same name twice records two
    /// entries.
    pub fn add_library(&mut self, name: impl Into<String>, result: &RunResult) {
        let name = name.into();
        let summary = &result.summary;
        let status = LibraryStatus::from_summary(summary);
        debug!(
            "library {name}: {}/{} passed, status {status:?}",
            summary.passed, summary.total
        );

        let overall = &mut self.overall;
        overall.total += summary.total;
        overall.passed += summary.passed;
        // Errors count as failures at this level.
        overall.failed += summary.failed + summary.error;
        overall.total_libs += 1;
        if status == LibraryStatus::Passed {
            overall.passed_libs += 1;
        }

        overall.libraries.push(LibraryResult {
            name,
            status,
            summary: summary.clone(),
            suites: result.suites.clone(),
        });
    }

    /// Returns the number of libraries added so far.
    pub fn library_count(&self) -> usize {
        self.overall.total_libs
    }

    /// Consumes the accumulator, returning the overall summary.
    pub fn finish(self) -> OverallSummary {
        self.overall
    }
}
