// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration support for xts.
//!
//! Configuration is read from a built-in default config, with the project's `.config/xts.toml` (or
//! a file passed in explicitly) layered on top. Settings are grouped into profiles: the `default`
//! profile always exists, and custom profiles override any subset of its keys.

mod imp;
mod reports;

pub use imp::*;
pub use reports::*;
