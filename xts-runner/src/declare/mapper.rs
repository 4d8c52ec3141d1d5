// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use regex::Regex;
use serde::Deserialize;
use std::{fmt, sync::LazyLock};

/// Maps a disabled registration call to the suite name it would have registered.
///
/// Registration calls and suite names usually differ: a call named `fooRootJsunit_x86` may
/// register the suite `fooTest_x86`. A mapper encodes that naming convention so that disabling the
/// call also excludes the suite.
pub trait SuiteNameMapper: fmt::Debug {
    /// Returns the suite name corresponding to `call_token`, or `None` if the mapper does not apply
    /// or would return the token unchanged.
    fn map_call(&self, call_token: &str) -> Option<String>;
}

/// Rewrites every `Root…Jsunit_` span in a call token to `Test_`.
///
/// For example, `mmkvRootJsunit_x86` maps to `mmkvTest_x86`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RootJsunitMapper;

static ROOT_JSUNIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Root.*?Jsunit_").expect("valid regex"));

impl SuiteNameMapper for RootJsunitMapper {
    fn map_call(&self, call_token: &str) -> Option<String> {
        let mapped = ROOT_JSUNIT_REGEX.replace_all(call_token, "Test_");
        (mapped != call_token).then(|| mapped.into_owned())
    }
}

/// A mapper that never maps anything: only the call token itself is excluded.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSuiteNameMapping;

impl SuiteNameMapper for NoSuiteNameMapping {
    fn map_call(&self, _call_token: &str) -> Option<String> {
        None
    }
}

/// The built-in suite name mappers, as selected in configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuiteNameMapping {
    /// Use [`RootJsunitMapper`].
    #[default]
    RootJsunit,

    /// Use [`NoSuiteNameMapping`].
    #[serde(rename = "none")]
    NoMapping,
}

impl SuiteNameMapping {
    /// Returns the mapper for this setting.
    pub fn to_mapper(self) -> Box<dyn SuiteNameMapper> {
        match self {
            Self::RootJsunit => Box::new(RootJsunitMapper),
            Self::NoMapping => Box::new(NoSuiteNameMapping),
        }
    }
}
