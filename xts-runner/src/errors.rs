// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by xts.

use camino::Utf8PathBuf;
use config::ConfigError;
use std::{error::Error, fmt, io};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse xts config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing a config.
///
/// Returned by [`ConfigParseError::kind`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// An error which indicates that a profile was requested but not known to xts.
#[derive(Clone, Debug, Error)]
#[error("profile `{profile}` not found (known profiles: {})", .all_profiles.join(", "))]
pub struct ProfileNotFound {
    profile: String,
    all_profiles: Vec<String>,
}

impl ProfileNotFound {
    pub(crate) fn new(
        profile: impl Into<String>,
        all_profiles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut all_profiles: Vec<_> = all_profiles.into_iter().map(|s| s.into()).collect();
        all_profiles.sort_unstable();
        Self {
            profile: profile.into(),
            all_profiles,
        }
    }

    /// Returns the profile that was requested.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

/// An error that stops a declaration scan from producing any results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeclareError {
    /// The test root does not exist, so there are no tests to run.
    ///
    /// This is not a failure of the test phase: callers typically skip the test run.
    #[error("test root `{root}` does not exist")]
    RootNotFound {
        /// The test root that was looked up.
        root: Utf8PathBuf,
    },
}

/// A test source file that was skipped during a declaration scan.
///
/// Such files are logged and skipped; they do not abort the scan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceFileError {
    /// The file could not be read, or was not valid UTF-8.
    #[error("failed to read test source `{path}`")]
    Read {
        /// The path to the file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// An entry in the test root could not be visited.
    #[error("failed to walk test root")]
    Walk {
        /// The underlying error.
        #[source]
        error: walkdir::Error,
    },

    /// A path in the test root was not valid UTF-8.
    #[error("test source path `{}` is not valid UTF-8", .path.display())]
    NonUtf8Path {
        /// The path, lossily converted.
        path: std::path::PathBuf,
    },
}

/// An error that occurred while writing a JSON or JUnit report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// A library name can't be used as a report directory name.
    #[error("invalid library name `{name}`: must be a single path component")]
    InvalidLibraryName {
        /// The library name.
        name: String,
    },

    /// An error occurred while creating a report file or its parent directory.
    #[error("error writing to path `{file}`")]
    Fs {
        /// The file being written to.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// An error occurred while serializing a JSON report.
    #[error("error serializing JSON report to `{file}`")]
    Json {
        /// The file being written to.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },

    /// An error occurred while serializing a JUnit report.
    #[error("error serializing JUnit report to `{file}`")]
    Junit {
        /// The file being written to.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: quick_junit::SerializeError,
    },
}

/// Displays an error along with its chain of causes, one per line.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut cause = self.error.source();
        while let Some(err) = cause {
            write!(f, "\n  caused by: {err}")?;
            cause = err.source();
        }

        Ok(())
    }
}
