// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::{error, warn};
use xts_metadata::XtsExitCode;
use xts_runner::errors::{ConfigParseError, DeclareError, ProfileNotFound, WriteReportError};

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholders: errors are printed with display_to_stderr, which
// colorizes them and prints the cause chain.

/// An error that xts knows how to report, with an associated exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine the current directory")]
    CurrentDirError {
        #[source]
        err: std::io::Error,
    },
    #[error("profile not found")]
    ProfileNotFound {
        #[from]
        err: ProfileNotFound,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("declaration scan failed")]
    DeclareError {
        #[from]
        err: DeclareError,
    },
    #[error("no tests declared")]
    NoTestsDeclared { root: Utf8PathBuf },
    #[error("failed to read transcript")]
    TranscriptReadError {
        // None means standard input.
        path: Option<Utf8PathBuf>,
        #[source]
        err: std::io::Error,
    },
    #[error("failed to write report")]
    WriteReportError {
        #[from]
        err: WriteReportError,
    },
    #[error("failed to write output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("test run failed")]
    TestRunFailed,
}

impl ExpectedError {
    pub(crate) fn current_dir_error(err: std::io::Error) -> Self {
        Self::CurrentDirError { err }
    }

    pub(crate) fn transcript_read_error(path: Option<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::TranscriptReadError { path, err }
    }

    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirError { .. }
            | Self::ProfileNotFound { .. }
            | Self::ConfigParseError { .. } => XtsExitCode::SETUP_ERROR,
            Self::DeclareError { .. } | Self::NoTestsDeclared { .. } => {
                XtsExitCode::NO_TESTS_DECLARED
            }
            Self::TranscriptReadError { .. } => XtsExitCode::TRANSCRIPT_READ_FAILED,
            Self::WriteReportError { .. } => XtsExitCode::REPORT_WRITE_FAILED,
            Self::WriteOutputError { .. } => XtsExitCode::WRITE_OUTPUT_ERROR,
            Self::TestRunFailed => XtsExitCode::TEST_RUN_FAILED,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::CurrentDirError { err } => {
                error!("could not determine the current directory");
                Some(err as &dyn Error)
            }
            Self::ProfileNotFound { err } => {
                error!("{err}");
                None
            }
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse xts config at `{}`",
                    err.config_file().style(styles.bold),
                );
                err.source()
            }
            Self::DeclareError { err } => {
                // A missing test root skips the test phase rather than failing it.
                warn!(
                    "{}, skipping tests",
                    err.to_string().style(styles.warning_text)
                );
                None
            }
            Self::NoTestsDeclared { root } => {
                warn!(
                    "no test suites declared under `{}`, skipping tests",
                    root.style(styles.bold),
                );
                None
            }
            Self::TranscriptReadError { path, err } => {
                match path {
                    Some(path) => error!("failed to read transcript `{}`", path.style(styles.bold)),
                    None => error!("failed to read transcript from standard input"),
                }
                Some(err as &dyn Error)
            }
            Self::WriteReportError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteOutputError { err } => {
                error!("failed to write output");
                Some(err as &dyn Error)
            }
            Self::TestRunFailed => {
                error!("test run failed");
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
