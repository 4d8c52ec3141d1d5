// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `xts` command-line tool.
//!
//! `xts declared` lists the test suites a project registers, `xts parse` turns the console
//! transcript of a harness run into results and reports, and `xts aggregate` summarizes several
//! libraries' runs together. Exit codes are documented in
//! [`XtsExitCode`](xts_metadata::XtsExitCode).

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
