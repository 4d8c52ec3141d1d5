// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The suites a test source tree declares, split into runnable and excluded names.
///
/// The two sets are always disjoint: a name that is excluded is never declared, even if it also
/// appears in a suite declaration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "DeclaredSuitesRepr")]
pub struct DeclaredSuites {
    declared: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl DeclaredSuites {
    /// Creates a new set of declared suites: `candidates` minus `excluded`.
    pub fn new(
        candidates: impl IntoIterator<Item = String>,
        excluded: impl IntoIterator<Item = String>,
    ) -> Self {
        let excluded: BTreeSet<_> = excluded.into_iter().collect();
        let declared = candidates
            .into_iter()
            .filter(|name| !excluded.contains(name))
            .collect();
        Self { declared, excluded }
    }

    /// Returns the runnable suite names, sorted.
    pub fn declared(&self) -> &BTreeSet<String> {
        &self.declared
    }

    /// Returns the suite names and registration call tokens that were excluded, sorted.
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Returns true if there are no runnable suites.
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    /// Returns the number of runnable suites.
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Returns true if the given suite is runnable.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Returns true if the given suite name or call token was excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// Returns the runnable suite names joined with commas, the form the remote harness expects
    /// for its `class` argument.
    pub fn to_class_arg(&self) -> String {
        self.declared
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeclaredSuitesRepr {
    declared: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl From<DeclaredSuitesRepr> for DeclaredSuites {
    fn from(repr: DeclaredSuitesRepr) -> Self {
        Self::new(repr.declared, repr.excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn excluded_wins() {
        let suites = DeclaredSuites::new(
            ["a".to_owned(), "b".to_owned(), "a".to_owned()],
            ["b".to_owned(), "c".to_owned()],
        );
        assert_eq!(suites.declared().iter().collect::<Vec<_>>(), ["a"]);
        assert_eq!(suites.excluded().iter().collect::<Vec<_>>(), ["b", "c"]);
        assert!(suites.is_declared("a"));
        assert!(!suites.is_declared("b"));
        assert!(suites.is_excluded("b"));
        assert_eq!(suites.len(), 1);
    }

    #[test]
    fn deserialize_keeps_sets_disjoint() {
        let suites: DeclaredSuites = serde_json::from_str(
            r#"{ "declared": ["a", "b"], "excluded": ["b"] }"#,
        )
        .unwrap();
        assert_eq!(suites.declared().iter().collect::<Vec<_>>(), ["a"]);
        assert!(suites.is_excluded("b"));
    }

    #[test]
    fn class_arg() {
        let suites = DeclaredSuites::new(["b".to_owned(), "a".to_owned()], []);
        assert_eq!(suites.to_class_arg(), "a,b");
        assert_eq!(DeclaredSuites::default().to_class_arg(), "");
    }
}
