// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for xts-runner.

/// Utilities for pluralizing various words based on count.
pub mod plural {
    /// Returns "test" if `count` is 1, otherwise "tests".
    pub fn tests_str(count: usize) -> &'static str {
        if count == 1 { "test" } else { "tests" }
    }

    /// Returns "suite" if `count` is 1, otherwise "suites".
    pub fn suites_str(count: usize) -> &'static str {
        if count == 1 { "suite" } else { "suites" }
    }

    /// Returns "library" if `count` is 1, otherwise "libraries".
    pub fn libraries_str(count: usize) -> &'static str {
        if count == 1 { "library" } else { "libraries" }
    }

    /// Returns "file" if `count` is 1, otherwise "files".
    pub fn files_str(count: usize) -> &'static str {
        if count == 1 { "file" } else { "files" }
    }

    /// Returns "key" if `count` is 1, otherwise "keys".
    pub fn keys_str(count: usize) -> &'static str {
        if count == 1 { "key" } else { "keys" }
    }
}

/// Characters used for terminal output theming.
///
/// Defaults to ASCII; call [`Self::use_unicode`] when the terminal supports it.
#[derive(Clone, Debug, Default)]
pub struct ThemeCharacters {
    use_unicode: bool,
}

impl ThemeCharacters {
    /// Switches to Unicode characters for richer terminal output.
    pub fn use_unicode(&mut self) {
        self.use_unicode = true;
    }

    /// Returns the mark for something that passed: `✓` or `+`.
    pub fn pass_mark(&self) -> &'static str {
        if self.use_unicode { "✓" } else { "+" }
    }

    /// Returns the mark for something that did not pass: `✗` or `x`.
    pub fn fail_mark(&self) -> &'static str {
        if self.use_unicode { "✗" } else { "x" }
    }
}
