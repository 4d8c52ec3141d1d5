// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    RootJsunitMapper, SuiteNameMapper, SuiteNameMapping,
    source::{FunctionDefinition, disabled_calls, registration_block, suite_declarations},
};
use crate::{
    errors::{DeclareError, DisplayErrorChain, SourceFileError},
    helpers::plural,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::{collections::BTreeSet, fs};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use xts_metadata::DeclaredSuites;

/// The result of a declaration scan.
#[derive(Debug)]
#[non_exhaustive]
pub struct DeclarationScan {
    /// The declared and excluded suites.
    pub suites: DeclaredSuites,

    /// Test sources that could not be read, and so did not contribute to [`Self::suites`].
    pub skipped: Vec<SourceFileError>,
}

/// Scans a tree of test sources for the suites they declare.
///
/// A suite is declared by a `describe('<name>', ...)` call in any test source. Suites are excluded
/// when their registration call is commented out in the registration block of a suite list file.
#[derive(Debug)]
pub struct DeclarationScanner {
    source_extensions: Vec<String>,
    list_marker: String,
    mapper: Box<dyn SuiteNameMapper>,
}

impl Default for DeclarationScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationScanner {
    /// Creates a new scanner with the default settings: `.test.ets`, `.test.ts` and `.test.js`
    /// sources, a `List` marker, and [`RootJsunitMapper`].
    pub fn new() -> Self {
        Self {
            source_extensions: ["ets", "ts", "js"].map(String::from).to_vec(),
            list_marker: "List".to_owned(),
            mapper: Box::new(RootJsunitMapper),
        }
    }

    /// Sets the extensions of test source files.
    pub fn with_source_extensions(
        mut self,
        extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.source_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the marker, matched case-insensitively, that identifies suite list files.
    pub fn with_list_marker(mut self, marker: impl Into<String>) -> Self {
        self.list_marker = marker.into();
        self
    }

    /// Uses one of the built-in suite name mappers.
    pub fn with_mapping(self, mapping: SuiteNameMapping) -> Self {
        Self {
            mapper: mapping.to_mapper(),
            ..self
        }
    }

    /// Uses a custom suite name mapper.
    pub fn with_mapper(mut self, mapper: impl SuiteNameMapper + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    /// Scans the test sources under `root`.
    ///
    /// Returns [`DeclareError::RootNotFound`] if `root` does not exist. Sources that cannot be
    /// read are logged and returned in [`DeclarationScan::skipped`].
    pub fn scan(&self, root: &Utf8Path) -> Result<DeclarationScan, DeclareError> {
        if !root.exists() {
            return Err(DeclareError::RootNotFound {
                root: root.to_owned(),
            });
        }

        let (sources, skipped) = self.read_sources(root);
        debug!(
            "read {} test source {} under {root}",
            sources.len(),
            plural::files_str(sources.len()),
        );

        let mut excluded = BTreeSet::new();
        for (idx, list) in sources.iter().enumerate().filter(|(_, s)| s.is_list) {
            let Some(block) = registration_block(&list.contents) else {
                continue;
            };
            let calls: Vec<_> = disabled_calls(block).collect();
            if calls.is_empty() {
                continue;
            }
            info!(
                "disabled suite registrations in {}: {}",
                list.display_path(root),
                calls.join(", "),
            );

            for call in calls {
                excluded.insert(call.to_owned());
                if let Some(mapped) = self.mapper.map_call(call) {
                    excluded.insert(mapped);
                }

                let definition = FunctionDefinition::new(call);
                for (_, other) in sources
                    .iter()
                    .enumerate()
                    .filter(|(other_idx, _)| *other_idx != idx)
                {
                    if !definition.is_defined_in(&other.contents) {
                        continue;
                    }
                    let names: Vec<_> = suite_declarations(&other.contents).collect();
                    if !names.is_empty() {
                        debug!(
                            "{} defines {}, excluding {}: {}",
                            other.display_path(root),
                            definition.name(),
                            plural::suites_str(names.len()),
                            names.join(", "),
                        );
                    }
                    excluded.extend(names.into_iter().map(str::to_owned));
                }
            }
        }

        let candidates = sources
            .iter()
            .flat_map(|source| suite_declarations(&source.contents))
            .map(str::to_owned);

        Ok(DeclarationScan {
            suites: DeclaredSuites::new(candidates, excluded),
            skipped,
        })
    }

    fn read_sources(&self, root: &Utf8Path) -> (Vec<SourceFile>, Vec<SourceFileError>) {
        let mut sources = Vec::new();
        let mut skipped = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    skip(&mut skipped, SourceFileError::Walk { error });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = match Utf8PathBuf::try_from(entry.into_path()) {
                Ok(path) => path,
                Err(error) => {
                    let path = error.into_path_buf();
                    if path
                        .file_name()
                        .is_some_and(|name| self.is_test_source(&name.to_string_lossy()))
                    {
                        skip(&mut skipped, SourceFileError::NonUtf8Path { path });
                    }
                    continue;
                }
            };
            let Some(file_name) = path.file_name() else {
                continue;
            };
            if !self.is_test_source(file_name) {
                continue;
            }
            let is_list = self.is_list_file(file_name);

            match fs::read_to_string(&path) {
                Ok(contents) => sources.push(SourceFile {
                    path,
                    contents,
                    is_list,
                }),
                Err(error) => skip(&mut skipped, SourceFileError::Read { path, error }),
            }
        }

        (sources, skipped)
    }

    /// Returns true if `file_name` looks like `<stem>.test.<ext>`.
    fn is_test_source(&self, file_name: &str) -> bool {
        let Some((rest, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.source_extensions.iter().any(|e| e == ext)
            && rest.strip_suffix(".test").is_some_and(|stem| !stem.is_empty())
    }

    fn is_list_file(&self, file_name: &str) -> bool {
        file_name
            .to_lowercase()
            .contains(&self.list_marker.to_lowercase())
    }
}

fn skip(skipped: &mut Vec<SourceFileError>, error: SourceFileError) {
    warn!("skipping test source: {}", DisplayErrorChain::new(&error));
    skipped.push(error);
}

#[derive(Debug)]
struct SourceFile {
    path: Utf8PathBuf,
    contents: String,
    is_list: bool,
}

impl SourceFile {
    fn display_path<'a>(&'a self, root: &Utf8Path) -> &'a Utf8Path {
        self.path.strip_prefix(root).unwrap_or(&self.path)
    }
}
