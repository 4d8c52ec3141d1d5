// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discovering the test suites a project declares.
//!
//! A test source tree is scanned before a run to decide which suites are expected to execute. If
//! nothing is declared, or the test root does not exist, the run can be skipped entirely.

mod mapper;
mod scanner;
mod source;

pub use mapper::*;
pub use scanner::*;

use crate::errors::DeclareError;
use camino::Utf8Path;

/// Scans `root` for declared suites using the default scanner settings.
///
/// See [`DeclarationScanner`] to customize file matching or suite name mapping.
pub fn extract_declared_tests(root: &Utf8Path) -> Result<DeclarationScan, DeclareError> {
    DeclarationScanner::new().scan(root)
}
