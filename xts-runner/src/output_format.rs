// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;
use std::io;

/// How xts writes results to standard output.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// A tree of results meant for people.
    Human {
        /// Whether to include additional detail.
        verbose: bool,
    },

    /// Machine-readable output.
    Serializable(SerializableFormat),
}

impl OutputFormat {
    /// Returns true if this is a human-readable format with verbose output.
    pub fn is_verbose(self) -> bool {
        matches!(self, Self::Human { verbose: true })
    }
}

/// A serialized, machine-readable output format.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SerializableFormat {
    /// JSON on a single line.
    Json,
    /// JSON, prettified.
    JsonPretty,
}

impl SerializableFormat {
    /// Writes `value` in this format, followed by a newline.
    pub fn write_line(self, value: &impl Serialize, mut writer: impl io::Write) -> io::Result<()> {
        match self {
            Self::Json => serde_json::to_writer(&mut writer, value)?,
            Self::JsonPretty => serde_json::to_writer_pretty(&mut writer, value)?,
        }
        writeln!(writer)
    }
}
