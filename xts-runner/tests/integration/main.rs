// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for xts-runner, run against the projects and transcripts in the workspace
//! `fixtures` directory.

mod declare;
mod fixtures;
mod run;
