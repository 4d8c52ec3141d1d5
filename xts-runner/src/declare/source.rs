// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-level matching over test source files.

use regex::Regex;
use std::sync::LazyLock;

static TESTSUITE_FN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+function\s+testsuite\s*\(\s*\)\s*\{").expect("valid regex")
});

static DISABLED_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*([A-Za-z0-9_]+)\(\);").expect("valid regex"));

static DESCRIBE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"describe\(\s*['"]([A-Za-z0-9_]*)['"]"#).expect("valid regex"));

/// Returns the body of the `export default function testsuite() { ... }` block, if present.
///
/// Braces are balanced, so nested blocks inside the body are included. If the block is never
/// closed, the rest of the file is returned.
pub(super) fn registration_block(contents: &str) -> Option<&str> {
    let open = TESTSUITE_FN_REGEX.find(contents)?;
    let body = &contents[open.end()..];

    let mut depth = 1usize;
    for (idx, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&body[..idx]);
                }
            }
            _ => {}
        }
    }
    Some(body)
}

/// Returns the call tokens of commented-out invocations like `// fooSuite();`.
pub(super) fn disabled_calls(block: &str) -> impl Iterator<Item = &str> {
    DISABLED_CALL_REGEX
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the names of suites declared with `describe('<name>'` or `describe("<name>"`.
///
/// Declarations with an empty name are skipped.
pub(super) fn suite_declarations(contents: &str) -> impl Iterator<Item = &str> {
    DESCRIBE_REGEX
        .captures_iter(contents)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
}

/// Matches a zero-argument function definition with a given name.
#[derive(Clone, Debug)]
pub(super) struct FunctionDefinition {
    name: String,
    regex: Regex,
}

impl FunctionDefinition {
    pub(super) fn new(name: &str) -> Self {
        let regex = Regex::new(&format!(r"function\s+{}\s*\(\)", regex::escape(name)))
            .expect("escaped identifier is a valid regex");
        Self {
            name: name.to_owned(),
            regex,
        }
    }

    pub(super) fn name(&self) -> &str {
        &self.name
    }

    pub(super) fn is_defined_in(&self, contents: &str) -> bool {
        self.regex.is_match(contents)
    }
}
