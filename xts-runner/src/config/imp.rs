// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::reports::{DefaultJunitImpl, JsonReportConfig, JsonReportImpl, JunitConfig, JunitImpl};
use crate::{
    declare::{DeclarationScanner, SuiteNameMapping},
    errors::{ConfigParseError, ConfigParseErrorKind, ProfileNotFound},
    helpers::plural,
    transcript::{TranscriptParser, UnknownStatusPolicy},
};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Overall configuration for xts.
///
/// Most settings are managed through [profiles](XtsProfile), obtained through the
/// [`profile`](Self::profile) method.
#[derive(Clone, Debug)]
pub struct XtsConfig {
    project_root: Utf8PathBuf,
    inner: XtsConfigImpl,
}

impl XtsConfig {
    /// The default location of the config within the project: `.config/xts.toml`.
    pub const CONFIG_PATH: &'static str = ".config/xts.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Project-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// The name of the default profile.
    pub const DEFAULT_PROFILE: &'static str = "default";

    /// Reads the xts config from the given file, or if not specified from `.config/xts.toml` in the
    /// project root.
    ///
    /// If no config file is specified and the project doesn't have `.config/xts.toml`, uses the
    /// default config options. Unknown keys are logged as warnings.
    pub fn from_sources(
        project_root: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let project_root = project_root.into();
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = project_root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (config, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            warn!(
                "ignoring unknown configuration {} in config file {config_file}: {}",
                plural::keys_str(unknown.len()),
                unknown.iter().join(", "),
            );
        }

        Ok(Self {
            project_root,
            inner: config.into_config_impl(),
        })
    }

    /// Returns the default xts config, ignoring any files in the project.
    pub fn default_config(project_root: impl Into<Utf8PathBuf>) -> Self {
        let (config, _unknown) = Self::build_and_deserialize_config(&Self::make_default_config())
            .expect("default config is always valid");
        Self {
            project_root: project_root.into(),
            inner: config.into_config_impl(),
        }
    }

    /// Returns the project root this config was read for.
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// Returns the profile with the given name, or an error if a profile was specified but not
    /// found.
    pub fn profile(&self, name: impl AsRef<str>) -> Result<XtsProfile<'_>, ProfileNotFound> {
        let name = name.as_ref();
        let custom_profile = match name {
            Self::DEFAULT_PROFILE => None,
            other => Some(
                self.inner
                    .other_profiles
                    .get(other)
                    .ok_or_else(|| ProfileNotFound::new(name, self.all_profiles()))?,
            ),
        };

        let mut store_dir = self.project_root.join(&self.inner.store.dir);
        store_dir.push(name);

        Ok(XtsProfile {
            name: name.to_owned(),
            project_root: &self.project_root,
            store_dir,
            default_profile: &self.inner.default_profile,
            custom_profile,
        })
    }

    /// Returns the names of all known profiles, including the default profile.
    pub fn all_profiles(&self) -> impl Iterator<Item = &str> {
        std::iter::once(Self::DEFAULT_PROFILE)
            .chain(self.inner.other_profiles.keys().map(String::as_str))
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// Returns the deserialized config along with the set of ignored paths.
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(XtsConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: XtsConfigDeserialize =
            serde_path_to_error::deserialize(ignored_de).map_err(|error| {
                // serde_path_to_error already reports the key, so strip it from the config error.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

/// An xts profile, resolved against the default profile.
///
/// Returned by [`XtsConfig::profile`].
#[derive(Clone, Debug)]
pub struct XtsProfile<'cfg> {
    name: String,
    project_root: &'cfg Utf8Path,
    store_dir: Utf8PathBuf,
    default_profile: &'cfg DefaultProfileImpl,
    custom_profile: Option<&'cfg CustomProfileImpl>,
}

impl<'cfg> XtsProfile<'cfg> {
    /// Returns the name of the profile.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the absolute directory this profile writes reports to.
    pub fn store_dir(&self) -> &Utf8Path {
        &self.store_dir
    }

    /// Returns the absolute path to the directory holding the test sources.
    pub fn test_root(&self) -> Utf8PathBuf {
        let test_root = self
            .custom_profile
            .and_then(|profile| profile.test_root.as_deref())
            .unwrap_or(&self.default_profile.test_root);
        self.project_root.join(test_root)
    }

    /// Returns the accepted extensions for test source files.
    pub fn source_extensions(&self) -> &'cfg [String] {
        self.custom_profile
            .and_then(|profile| profile.source_extensions.as_deref())
            .unwrap_or(&self.default_profile.source_extensions)
    }

    /// Returns the marker identifying files with suite registration blocks.
    pub fn list_marker(&self) -> &'cfg str {
        self.custom_profile
            .and_then(|profile| profile.list_marker.as_deref())
            .unwrap_or(&self.default_profile.list_marker)
    }

    /// Returns how disabled registration calls are mapped to suite names.
    pub fn suite_name_mapping(&self) -> SuiteNameMapping {
        self.custom_profile
            .and_then(|profile| profile.suite_name_mapping)
            .unwrap_or(self.default_profile.suite_name_mapping)
    }

    /// Returns how cases without a reported status are counted.
    pub fn unknown_status(&self) -> UnknownStatusPolicy {
        self.custom_profile
            .and_then(|profile| profile.unknown_status)
            .unwrap_or(self.default_profile.unknown_status)
    }

    /// Returns the JSON results file config, if one is configured.
    pub fn json(&self) -> Option<JsonReportConfig<'cfg>> {
        JsonReportConfig::new(
            self.custom_profile.map(|profile| &profile.json),
            &self.default_profile.json,
        )
    }

    /// Returns the JUnit report config, if one is configured.
    pub fn junit(&self) -> Option<JunitConfig<'cfg>> {
        JunitConfig::new(
            self.custom_profile.map(|profile| &profile.junit),
            &self.default_profile.junit,
        )
    }

    /// Returns a declaration scanner set up with this profile's settings.
    pub fn scanner(&self) -> DeclarationScanner {
        DeclarationScanner::new()
            .with_source_extensions(self.source_extensions().iter().cloned())
            .with_list_marker(self.list_marker())
            .with_mapping(self.suite_name_mapping())
    }

    /// Returns a transcript parser set up with this profile's settings.
    pub fn transcript_parser(&self) -> TranscriptParser {
        TranscriptParser::new().with_unknown_status(self.unknown_status())
    }
}

#[derive(Clone, Debug)]
struct XtsConfigImpl {
    store: StoreConfigImpl,
    default_profile: DefaultProfileImpl,
    other_profiles: BTreeMap<String, CustomProfileImpl>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct XtsConfigDeserialize {
    store: StoreConfigImpl,
    #[serde(rename = "profile")]
    profiles: BTreeMap<String, CustomProfileImpl>,
}

impl XtsConfigDeserialize {
    fn into_config_impl(mut self) -> XtsConfigImpl {
        let p = self
            .profiles
            .remove(XtsConfig::DEFAULT_PROFILE)
            .expect("default profile should exist");
        XtsConfigImpl {
            store: self.store,
            default_profile: DefaultProfileImpl::new(p),
            other_profiles: self.profiles,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct StoreConfigImpl {
    dir: Utf8PathBuf,
}

#[derive(Clone, Debug)]
struct DefaultProfileImpl {
    test_root: Utf8PathBuf,
    source_extensions: Vec<String>,
    list_marker: String,
    suite_name_mapping: SuiteNameMapping,
    unknown_status: UnknownStatusPolicy,
    json: JsonReportImpl,
    junit: DefaultJunitImpl,
}

impl DefaultProfileImpl {
    fn new(p: CustomProfileImpl) -> Self {
        Self {
            test_root: p.test_root.expect("test-root present in default profile"),
            source_extensions: p
                .source_extensions
                .expect("source-extensions present in default profile"),
            list_marker: p
                .list_marker
                .expect("list-marker present in default profile"),
            suite_name_mapping: p
                .suite_name_mapping
                .expect("suite-name-mapping present in default profile"),
            unknown_status: p
                .unknown_status
                .expect("unknown-status present in default profile"),
            json: p.json,
            junit: DefaultJunitImpl::for_default_profile(p.junit),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CustomProfileImpl {
    #[serde(default)]
    test_root: Option<Utf8PathBuf>,
    #[serde(default)]
    source_extensions: Option<Vec<String>>,
    #[serde(default)]
    list_marker: Option<String>,
    #[serde(default)]
    suite_name_mapping: Option<SuiteNameMapping>,
    #[serde(default)]
    unknown_status: Option<UnknownStatusPolicy>,
    #[serde(default)]
    json: JsonReportImpl,
    #[serde(default)]
    junit: JunitImpl,
}
