// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Machine-readable results for xts, the OpenHarmony third-party library test harness.
//!
//! The types in this crate are produced by `xts-runner` and serialized by the `xts` command-line
//! tool. They are deliberately plain data: parsing a transcript or scanning test sources happens
//! in `xts-runner`, and the results land here once they are complete.
//!
//! All serialized field names are kebab-case.

mod declared;
mod exit_codes;
mod overall;
mod run_result;

pub use declared::*;
pub use exit_codes::*;
pub use overall::*;
pub use run_result::*;
