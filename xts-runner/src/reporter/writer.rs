// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{JsonReport, junit_report};
use crate::{
    config::{JsonReportConfig, JunitConfig, XtsProfile},
    errors::WriteReportError,
};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
};
use tracing::debug;
use xts_metadata::{OverallSummary, RunResult};

/// The name of the file the overall summary is written to, within the store directory.
pub const OVERALL_RESULTS_FILE: &str = "overall-results.json";

/// Writes the report files configured for a profile.
#[derive(Clone, Debug)]
pub struct ReportWriter<'cfg> {
    store_dir: Utf8PathBuf,
    json: Option<JsonReportConfig<'cfg>>,
    junit: Option<JunitConfig<'cfg>>,
}

impl<'cfg> ReportWriter<'cfg> {
    /// Creates a new writer for the given profile.
    pub fn new(profile: &XtsProfile<'cfg>) -> Self {
        Self {
            store_dir: profile.store_dir().to_owned(),
            json: profile.json(),
            junit: profile.junit(),
        }
    }

    /// Returns the directory reports are written to.
    pub fn store_dir(&self) -> &Utf8Path {
        &self.store_dir
    }

    /// Writes the reports for a single run, returning the paths that were written.
    ///
    /// If `library` is specified, reports go to a subdirectory of the store directory named after
    /// it. The name must be a single path component.
    pub fn write_library(
        &self,
        library: Option<&str>,
        result: &RunResult,
    ) -> Result<Vec<Utf8PathBuf>, WriteReportError> {
        let dir = match library {
            Some(library) => {
                check_library_name(library)?;
                self.store_dir.join(library)
            }
            None => self.store_dir.clone(),
        };

        let mut written = Vec::new();
        if let Some(json) = &self.json {
            let path = json.path(&dir);
            write_json(&path, &JsonReport::new(result))?;
            written.push(path);
        }

        if let Some(junit) = &self.junit {
            let path = junit.path(&dir);
            let report = junit_report(junit.report_name(), result);
            let mut writer = create_file(&path)?;
            report
                .serialize(&mut writer)
                .map_err(|error| WriteReportError::Junit {
                    file: path.clone(),
                    error,
                })?;
            writer.flush().map_err(|error| WriteReportError::Fs {
                file: path.clone(),
                error,
            })?;
            written.push(path);
        }

        debug!("wrote {} report files to {dir}", written.len());
        Ok(written)
    }

    /// Writes the summary of several libraries to [`OVERALL_RESULTS_FILE`] in the store directory.
    pub fn write_overall(&self, overall: &OverallSummary) -> Result<Utf8PathBuf, WriteReportError> {
        let path = self.store_dir.join(OVERALL_RESULTS_FILE);
        write_json(&path, overall)?;
        Ok(path)
    }
}

fn check_library_name(name: &str) -> Result<(), WriteReportError> {
    let mut components = Utf8Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(component)), None)
            if component == name && !name.contains(['/', '\\']) =>
        {
            Ok(())
        }
        _ => Err(WriteReportError::InvalidLibraryName {
            name: name.to_owned(),
        }),
    }
}

fn write_json(path: &Utf8Path, value: &impl Serialize) -> Result<(), WriteReportError> {
    let mut writer = create_file(path)?;
    serde_json::to_writer_pretty(&mut writer, value).map_err(|error| WriteReportError::Json {
        file: path.to_owned(),
        error,
    })?;
    writer
        .flush()
        .map_err(|error| WriteReportError::Fs {
            file: path.to_owned(),
            error,
        })
}

fn create_file(path: &Utf8Path) -> Result<BufWriter<File>, WriteReportError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|error| WriteReportError::Fs {
            file: dir.to_owned(),
            error,
        })?;
    }
    let f = File::create(path).map_err(|error| WriteReportError::Fs {
        file: path.to_owned(),
        error,
    })?;
    Ok(BufWriter::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accumulator::RunAccumulator, config::XtsConfig, transcript::extract_test_results};
    use camino_tempfile::Utf8TempDir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const TRANSCRIPT: &str = indoc! {"
        OHOS_REPORT_STATUS: class=FooTest
        OHOS_REPORT_STATUS: test=encode
        OHOS_REPORT_STATUS_CODE: 0
        OHOS_REPORT_STATUS: consuming=40
    "};

    #[test]
    fn write_library_reports() {
        let dir = Utf8TempDir::new().unwrap();
        let config = XtsConfig::default_config(dir.path());
        let profile = config.profile(XtsConfig::DEFAULT_PROFILE).unwrap();
        let writer = ReportWriter::new(&profile);
        let result = extract_test_results(TRANSCRIPT);

        let store_dir = dir.path().join("target/xts/default");
        assert_eq!(writer.store_dir(), store_dir.as_path());

        let written = writer.write_library(Some("mmkv"), &result).unwrap();
        assert_eq!(
            written,
            vec![
                store_dir.join("mmkv/results.json"),
                store_dir.join("mmkv/junit.xml"),
            ]
        );

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["total-time-ms"], "40ms");

        let xml = std::fs::read_to_string(&written[1]).unwrap();
        assert!(xml.contains(r#"<testsuites name="xts-run""#), "{xml}");
        assert!(xml.trim_end().ends_with("</testsuites>"), "complete file: {xml}");

        let written = writer.write_library(None, &result).unwrap();
        assert_eq!(written[0], store_dir.join("results.json"));
    }

    #[test]
    fn custom_report_paths() {
        let dir = Utf8TempDir::new().unwrap();
        let config_file = dir.path().join("xts.toml");
        std::fs::write(
            &config_file,
            indoc! {r#"
                [profile.ci.junit]
                path = "reports/junit.xml"
            "#},
        )
        .unwrap();

        let config = XtsConfig::from_sources(dir.path(), Some(config_file.as_path())).unwrap();
        let profile = config.profile("ci").unwrap();
        let written = ReportWriter::new(&profile)
            .write_library(None, &extract_test_results(TRANSCRIPT))
            .unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("target/xts/ci/results.json"),
                dir.path().join("target/xts/ci/reports/junit.xml"),
            ]
        );
    }

    #[test]
    fn write_overall() {
        let dir = Utf8TempDir::new().unwrap();
        let config = XtsConfig::default_config(dir.path());
        let profile = config.profile(XtsConfig::DEFAULT_PROFILE).unwrap();

        let mut accumulator = RunAccumulator::new();
        accumulator.add_library("mmkv", &extract_test_results(TRANSCRIPT));
        let overall = accumulator.finish();

        let path = ReportWriter::new(&profile).write_overall(&overall).unwrap();
        assert_eq!(path, dir.path().join("target/xts/default/overall-results.json"));

        let read: OverallSummary =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, overall);
    }

    #[test]
    fn library_names_stay_in_store_dir() {
        let dir = Utf8TempDir::new().unwrap();
        let config = XtsConfig::default_config(dir.path());
        let profile = config.profile(XtsConfig::DEFAULT_PROFILE).unwrap();
        let writer = ReportWriter::new(&profile);
        let result = extract_test_results(TRANSCRIPT);

        for name in ["/tmp/x", "..", "../x", "a/b", "a\\b", ".", ""] {
            let error = writer.write_library(Some(name), &result).unwrap_err();
            assert!(
                matches!(&error, WriteReportError::InvalidLibraryName { name: n } if n == name),
                "name {name:?}: unexpected error: {error:?}"
            );
        }
        assert!(
            !dir.path().join("target").exists(),
            "nothing is written for invalid names"
        );

        let written = writer.write_library(Some("mmkv.v2"), &result).unwrap();
        assert!(written[0].starts_with(writer.store_dir().join("mmkv.v2")));
    }

    #[test]
    fn unwritable_store_dir() {
        let dir = Utf8TempDir::new().unwrap();
        // A file where the store directory should be.
        std::fs::write(dir.path().join("target"), "").unwrap();

        let config = XtsConfig::default_config(dir.path());
        let profile = config.profile(XtsConfig::DEFAULT_PROFILE).unwrap();
        let error = ReportWriter::new(&profile)
            .write_library(None, &extract_test_results(TRANSCRIPT))
            .unwrap_err();
        assert!(
            matches!(error, WriteReportError::Fs { .. }),
            "unexpected error: {error:?}"
        );
    }
}
