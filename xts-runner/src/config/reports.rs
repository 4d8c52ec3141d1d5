// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// JSON results file configuration stored within a profile.
///
/// Returned by [`XtsProfile::json`](super::XtsProfile::json).
#[derive(Clone, Debug)]
pub struct JsonReportConfig<'cfg> {
    // Relative to the store dir.
    path: &'cfg Utf8Path,
}

impl<'cfg> JsonReportConfig<'cfg> {
    pub(super) fn new(
        custom_data: Option<&'cfg JsonReportImpl>,
        default_data: &'cfg JsonReportImpl,
    ) -> Option<Self> {
        custom_data
            .and_then(|custom| custom.path.as_deref())
            .or(default_data.path.as_deref())
            .map(|path| Self { path })
    }

    /// Returns the absolute path to the results file, given the profile's store directory.
    pub fn path(&self, store_dir: &Utf8Path) -> Utf8PathBuf {
        store_dir.join(self.path)
    }
}

/// JUnit report configuration stored within a profile.
///
/// Returned by [`XtsProfile::junit`](super::XtsProfile::junit).
#[derive(Clone, Debug)]
pub struct JunitConfig<'cfg> {
    path: &'cfg Utf8Path,
    report_name: &'cfg str,
}

impl<'cfg> JunitConfig<'cfg> {
    pub(super) fn new(
        custom_data: Option<&'cfg JunitImpl>,
        default_data: &'cfg DefaultJunitImpl,
    ) -> Option<Self> {
        let path = custom_data
            .and_then(|custom| custom.path.as_deref())
            .or(default_data.path.as_deref());

        path.map(|path| {
            let report_name = custom_data
                .and_then(|custom| custom.report_name.as_deref())
                .unwrap_or(&default_data.report_name);
            Self { path, report_name }
        })
    }

    /// Returns the absolute path to the JUnit report, given the profile's store directory.
    pub fn path(&self, store_dir: &Utf8Path) -> Utf8PathBuf {
        store_dir.join(self.path)
    }

    /// Returns the name of the top-level `testsuites` element.
    pub fn report_name(&self) -> &'cfg str {
        self.report_name
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct JsonReportImpl {
    #[serde(default)]
    path: Option<Utf8PathBuf>,
}

#[derive(Clone, Debug)]
pub(super) struct DefaultJunitImpl {
    path: Option<Utf8PathBuf>,
    report_name: String,
}

impl DefaultJunitImpl {
    // The default config defines every field.
    pub(super) fn for_default_profile(data: JunitImpl) -> Self {
        Self {
            path: data.path,
            report_name: data
                .report_name
                .expect("junit.report-name present in default profile"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(super) struct JunitImpl {
    #[serde(default)]
    path: Option<Utf8PathBuf>,
    #[serde(default)]
    report_name: Option<String>,
}
