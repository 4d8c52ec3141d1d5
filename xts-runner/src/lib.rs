// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `xts`, a runner for OpenHarmony-style XTS test suites.
//!
//! A run happens in two phases, driven by a build and deploy step that lives elsewhere:
//!
//! 1. Before deploying, [`declare`] scans a project's test sources for the suites it registers,
//!    so that the harness can be told which classes to run.
//! 2. After the harness finishes, [`transcript`] parses its console output into a
//!    [`RunResult`](xts_metadata::RunResult).
//!
//! Results are printed and written to files by [`reporter`], and [`accumulator`] combines the
//! results of several libraries tested one after another.

pub mod accumulator;
pub mod config;
pub mod declare;
pub mod errors;
mod helpers;
pub mod output_format;
pub mod reporter;
pub mod transcript;

pub use helpers::plural;
