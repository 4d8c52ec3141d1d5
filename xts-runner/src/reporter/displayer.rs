// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::{ThemeCharacters, plural};
use owo_colors::{OwoColorize, Style};
use std::io;
use xts_metadata::{DeclaredSuites, LibraryStatus, OverallSummary, RunResult, TotalTimeSource};

/// Writes results as a human-readable tree.
///
/// A run is displayed as:
///
/// ```text
/// ✓ Test Results 120ms
///   ✓ FooTest    42ms
///         ✓ encode    40ms
///         ✓ decode    2ms
///   ✗ BarTest    78ms
///         ✗ parse    78ms
///                 ✗ Error in parse,expected 1 to equal 2
/// 2/3 tests passed
/// ```
///
/// Case lines are indented with a tab and error lines with two.
#[derive(Clone, Debug, Default)]
pub struct ResultDisplayer {
    styles: Styles,
    theme: ThemeCharacters,
    verbose: bool,
}

impl ResultDisplayer {
    /// Creates a new displayer with plain ASCII output.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Colorizes output.
    pub fn colorize(&mut self) {
        self.styles.colorize();
    }

    /// Uses Unicode marks for pass and fail.
    pub fn use_unicode(&mut self) {
        self.theme.use_unicode();
    }

    /// Writes the results of a single run.
    pub fn write_run(&self, result: &RunResult, mut writer: impl io::Write) -> io::Result<()> {
        let summary = &result.summary;
        writeln!(
            writer,
            "{} Test Results {}ms",
            self.theme.pass_mark().style(self.styles.pass),
            summary.total_elapsed_ms.style(self.styles.count),
        )?;

        for suite in result.suites.values() {
            writeln!(
                writer,
                "  {} {}    {}ms",
                self.mark(suite.all_passed()),
                suite.name.style(self.styles.suite),
                suite.elapsed_ms,
            )?;

            for case in suite.test_cases.values() {
                writeln!(
                    writer,
                    "\t{} {}    {}",
                    self.mark(case.status.is_passed()),
                    case.name,
                    case.display_time(),
                )?;
                if let Some(detail) = &case.error_detail {
                    writeln!(
                        writer,
                        "\t\t{} {}",
                        self.theme.fail_mark().style(self.styles.fail),
                        detail,
                    )?;
                }
                if self.verbose && !case.status.is_reported() {
                    writeln!(writer, "\t\t(no status reported)")?;
                }
            }
        }

        writeln!(
            writer,
            "{}/{} {} passed",
            summary.passed.style(self.styles.count),
            summary.total.style(self.styles.count),
            plural::tests_str(summary.total),
        )?;

        if self.verbose {
            writeln!(
                writer,
                "  failed: {}, error: {}, total time: {}",
                summary.failed.style(self.styles.count),
                summary.error.style(self.styles.count),
                time_source_str(summary.elapsed_source),
            )?;
        }

        Ok(())
    }

    /// Writes the results of several libraries run one after another.
    pub fn write_overall(
        &self,
        overall: &OverallSummary,
        mut writer: impl io::Write,
    ) -> io::Result<()> {
        for library in &overall.libraries {
            writeln!(
                writer,
                "  {} {}    {}/{} {} passed",
                self.mark(library.status == LibraryStatus::Passed),
                library.name.style(self.styles.suite),
                library.summary.passed,
                library.summary.total,
                plural::tests_str(library.summary.total),
            )?;
        }

        writeln!(
            writer,
            "{}/{} {} passed, {}/{} {} passed",
            overall.passed_libs.style(self.styles.count),
            overall.total_libs.style(self.styles.count),
            plural::libraries_str(overall.total_libs),
            overall.passed.style(self.styles.count),
            overall.total.style(self.styles.count),
            plural::tests_str(overall.total),
        )
    }

    /// Writes the suites found by a declaration scan. Excluded suites are only shown in verbose
    /// mode.
    pub fn write_declared(
        &self,
        suites: &DeclaredSuites,
        mut writer: impl io::Write,
    ) -> io::Result<()> {
        writeln!(
            writer,
            "{} {} declared",
            suites.len().style(self.styles.count),
            plural::suites_str(suites.len()),
        )?;
        for name in suites.declared() {
            writeln!(writer, "    {}", name.style(self.styles.suite))?;
        }

        if self.verbose && !suites.excluded().is_empty() {
            writeln!(
                writer,
                "{} excluded",
                suites.excluded().len().style(self.styles.count),
            )?;
            for name in suites.excluded() {
                writeln!(writer, "    {}", name.style(self.styles.skip))?;
            }
        }

        Ok(())
    }

    fn mark(&self, passed: bool) -> String {
        if passed {
            self.theme.pass_mark().style(self.styles.pass).to_string()
        } else {
            self.theme.fail_mark().style(self.styles.fail).to_string()
        }
    }
}

fn time_source_str(source: TotalTimeSource) -> &'static str {
    match source {
        TotalTimeSource::TaskTime => "reported task time",
        TotalTimeSource::SuiteSum => "sum of suite times",
        TotalTimeSource::CaseSum => "sum of test times",
        TotalTimeSource::Unavailable => "unavailable",
    }
}

#[derive(Clone, Debug, Default)]
struct Styles {
    count: Style,
    pass: Style,
    fail: Style,
    skip: Style,
    suite: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
        self.skip = Style::new().yellow();
        self.suite = Style::new().blue().bold();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{accumulator::RunAccumulator, transcript::extract_test_results};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const TRANSCRIPT: &str = indoc! {"
        OHOS_REPORT_STATUS: class=FooTest
        OHOS_REPORT_STATUS: test=encode
        OHOS_REPORT_STATUS_CODE: 0
        OHOS_REPORT_STATUS: consuming=40
        OHOS_REPORT_STATUS: test=decode
        OHOS_REPORT_STATUS_CODE: 0
        OHOS_REPORT_STATUS: consuming=0
        OHOS_REPORT_STATUS: suiteconsuming=42
        OHOS_REPORT_STATUS: class=BarTest
        OHOS_REPORT_STATUS: test=parse
        OHOS_REPORT_STATUS_CODE: -1
        OHOS_REPORT_STATUS: stack=expected 1 to equal 2
        OHOS_REPORT_STATUS: consuming=78
        OHOS_REPORT_STATUS: test=hang
        OHOS_REPORT_STATUS_CODE: 1
        OHOS_REPORT_STATUS: taskconsuming=120
    "};

    fn display(displayer: &ResultDisplayer, result: &RunResult) -> String {
        let mut buf = Vec::new();
        displayer.write_run(result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn run_tree() {
        let result = extract_test_results(TRANSCRIPT);
        let mut displayer = ResultDisplayer::new(false);
        displayer.use_unicode();

        assert_eq!(
            display(&displayer, &result),
            indoc! {"
                ✓ Test Results 120ms
                  ✓ FooTest    42ms
                \t✓ encode    40ms
                \t✓ decode    1ms
                  ✗ BarTest    78ms
                \t✗ parse    78ms
                \t\t✗ Error in parse,expected 1 to equal 2
                \t✗ hang    1ms
                2/4 tests passed
            "}
        );
    }

    #[test]
    fn run_tree_verbose_ascii() {
        let result = extract_test_results(TRANSCRIPT);
        let displayer = ResultDisplayer::new(true);

        assert_eq!(
            display(&displayer, &result),
            indoc! {"
                + Test Results 120ms
                  + FooTest    42ms
                \t+ encode    40ms
                \t+ decode    1ms
                  x BarTest    78ms
                \tx parse    78ms
                \t\tx Error in parse,expected 1 to equal 2
                \tx hang    1ms
                \t\t(no status reported)
                2/4 tests passed
                  failed: 2, error: 0, total time: reported task time
            "}
        );
    }

    #[test]
    fn colorized_output_has_escapes() {
        let result = extract_test_results(TRANSCRIPT);
        let mut displayer = ResultDisplayer::new(false);
        displayer.colorize();
        let output = display(&displayer, &result);
        assert!(output.contains("\u{1b}["), "expected ANSI escapes in {output:?}");
    }

    #[test]
    fn overall() {
        let mut accumulator = RunAccumulator::new();
        accumulator.add_library("mmkv", &extract_test_results(TRANSCRIPT));
        accumulator.add_library(
            "lottie",
            &extract_test_results(indoc! {"
                OHOS_REPORT_STATUS: class=LottieTest
                OHOS_REPORT_STATUS: test=load
                OHOS_REPORT_STATUS_CODE: 0
            "}),
        );
        let overall = accumulator.finish();

        let mut displayer = ResultDisplayer::new(false);
        displayer.use_unicode();
        let mut buf = Vec::new();
        displayer.write_overall(&overall, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            indoc! {"
                  ✗ mmkv    2/4 tests passed
                  ✓ lottie    1/1 test passed
                1/2 libraries passed, 3/5 tests passed
            "}
        );
    }

    #[test]
    fn declared() {
        let suites = DeclaredSuites::new(
            ["FooTest".to_owned(), "BarTest".to_owned()],
            ["BazTest".to_owned()],
        );

        let mut buf = Vec::new();
        ResultDisplayer::new(false)
            .write_declared(&suites, &mut buf)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2 suites declared\n    BarTest\n    FooTest\n"
        );

        let mut buf = Vec::new();
        ResultDisplayer::new(true)
            .write_declared(&suites, &mut buf)
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2 suites declared\n    BarTest\n    FooTest\n1 excluded\n    BazTest\n"
        );
    }
}
