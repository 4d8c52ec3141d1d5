// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report the results of a run in human and machine-readable formats.
//!
//! [`ResultDisplayer`] writes a tree of results for people, and [`ReportWriter`] writes the JSON
//! and JUnit files configured for a profile.

mod displayer;
mod json;
mod junit;
mod writer;

pub use displayer::*;
pub use json::*;
pub use junit::*;
pub use writer::*;
