// Copyright (c) The xts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{
    io::{self, Read, Write},
    str::FromStr,
};
use thiserror::Error;
use tracing::info;
use xts_metadata::{LibraryStatus, XtsExitCode};
use xts_runner::{
    accumulator::RunAccumulator,
    config::{XtsConfig, XtsProfile},
    output_format::{OutputFormat, SerializableFormat},
    plural,
    reporter::{ReportWriter, ResultDisplayer},
};

/// Runs and reports on OpenHarmony-style XTS test suites.
///
/// xts finds the test suites a project declares before deployment, and turns the console
/// transcript of a harness run into results and reports afterwards.
#[derive(Debug, Parser)]
#[command(
    name = "xts",
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct XtsApp {
    #[clap(flatten)]
    common: CommonOpts,

    #[clap(subcommand)]
    command: Command,
}

impl XtsApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.common.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let project_root = match self.common.project_dir {
            Some(project_dir) => project_dir,
            None => current_dir()?,
        };
        let config = self.common.config_opts.make_config(&project_root)?;
        let profile = config.profile(
            self.common
                .config_opts
                .profile
                .as_deref()
                .unwrap_or(XtsConfig::DEFAULT_PROFILE),
        )?;

        match self.command {
            Command::Declared {
                root,
                message_format,
            } => exec_declared(
                &profile,
                root,
                message_format.to_output_format(output.verbose),
                output,
                output_writer,
            ),
            Command::Parse(opts) => opts.exec(&profile, output, output_writer),
            Command::Aggregate(opts) => opts.exec(&profile, output, output_writer),
        }
    }
}

#[derive(Debug, Args)]
struct CommonOpts {
    /// Project directory [default: the current directory].
    #[arg(long, global = true, value_name = "PATH")]
    project_dir: Option<Utf8PathBuf>,

    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,
}

/// Configuration options for xts.
#[derive(Debug, Args)]
#[command(next_help_heading = "Config options")]
struct ConfigOpts {
    /// Config file [default: project-dir/.config/xts.toml].
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// The xts profile to use.
    ///
    /// Profiles set the test root, the reports to write and how results are summarized. Profiles
    /// other than `default` inherit unset values from `default`.
    #[arg(long, short = 'P', env = "XTS_PROFILE", global = true)]
    profile: Option<String>,
}

impl ConfigOpts {
    fn make_config(&self, project_root: &Utf8Path) -> Result<XtsConfig> {
        XtsConfig::from_sources(project_root, self.config_file.as_deref())
            .map_err(ExpectedError::from)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the test suites declared by a project's test sources.
    ///
    /// Suites whose registration is commented out in the suite list are excluded. Exits with
    /// status 4 if the test root is missing or declares no suites.
    Declared {
        /// Test root to scan [default: the profile's test-root, relative to the project].
        #[arg(long, value_name = "PATH")]
        root: Option<Utf8PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t, value_name = "FMT")]
        message_format: MessageFormatOpts,
    },

    /// Parse the transcript of a harness run, print results and write reports.
    Parse(ParseOpts),

    /// Parse the transcripts of several libraries and summarize them together.
    Aggregate(AggregateOpts),
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum MessageFormatOpts {
    /// A human-readable tree.
    #[default]
    Human,
    /// JSON with no whitespace.
    Json,
    /// JSON, prettified.
    JsonPretty,
}

impl MessageFormatOpts {
    fn to_output_format(self, verbose: bool) -> OutputFormat {
        match self {
            Self::Human => OutputFormat::Human { verbose },
            Self::Json => OutputFormat::Serializable(SerializableFormat::Json),
            Self::JsonPretty => OutputFormat::Serializable(SerializableFormat::JsonPretty),
        }
    }
}

#[derive(Debug, Args)]
struct ParseOpts {
    /// Transcript to read, or `-` for standard input [default: standard input].
    #[arg(value_name = "TRANSCRIPT")]
    transcript: Option<Utf8PathBuf>,

    /// Write reports into a subdirectory of the store named after this library.
    #[arg(long, value_name = "NAME")]
    library: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t, value_name = "FMT")]
    message_format: MessageFormatOpts,

    /// Do not write the JSON and JUnit reports configured for the profile.
    #[arg(long)]
    no_reports: bool,
}

impl ParseOpts {
    fn exec(
        self,
        profile: &XtsProfile<'_>,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let path = self.transcript.filter(|path| path.as_str() != "-");
        let transcript = read_transcript(path.as_deref())?;
        let result = profile.transcript_parser().parse_lossy(&transcript);

        let mut writer = output_writer.stdout_writer();
        let res = match self.message_format.to_output_format(output.verbose) {
            OutputFormat::Serializable(format) => format.write_line(&result, &mut writer),
            _ => make_displayer(output).write_run(&result, &mut writer),
        };
        res.and_then(|()| writer.flush())
            .map_err(ExpectedError::write_output_error)?;

        if !self.no_reports {
            let paths = ReportWriter::new(profile).write_library(self.library.as_deref(), &result)?;
            for path in paths {
                info!("wrote report to {path}");
            }
        }

        if LibraryStatus::from_summary(&result.summary) == LibraryStatus::Passed {
            Ok(XtsExitCode::OK)
        } else {
            Err(ExpectedError::TestRunFailed)
        }
    }
}

#[derive(Debug, Args)]
struct AggregateOpts {
    /// Transcripts to aggregate, in order.
    #[arg(value_name = "NAME=PATH", required = true)]
    libraries: Vec<LibraryArg>,

    /// Output format.
    #[arg(long, value_enum, default_value_t, value_name = "FMT")]
    message_format: MessageFormatOpts,

    /// Do not write per-library reports or the overall summary.
    #[arg(long)]
    no_reports: bool,
}

impl AggregateOpts {
    fn exec(
        self,
        profile: &XtsProfile<'_>,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let report_writer = ReportWriter::new(profile);
        let parser = profile.transcript_parser();
        let mut accumulator = RunAccumulator::new();

        for LibraryArg { name, path } in &self.libraries {
            let transcript = read_transcript(Some(path))?;
            let result = parser.parse_lossy(&transcript);
            if !self.no_reports {
                report_writer.write_library(Some(name), &result)?;
            }
            accumulator.add_library(name.as_str(), &result);
        }
        info!(
            "parsed transcripts for {} {}",
            accumulator.library_count(),
            plural::libraries_str(accumulator.library_count()),
        );
        let overall = accumulator.finish();

        if !self.no_reports {
            let path = report_writer.write_overall(&overall)?;
            info!("wrote overall results to {path}");
        }

        let mut writer = output_writer.stdout_writer();
        let res = match self.message_format.to_output_format(output.verbose) {
            OutputFormat::Serializable(format) => format.write_line(&overall, &mut writer),
            _ => make_displayer(output).write_overall(&overall, &mut writer),
        };
        res.and_then(|()| writer.flush())
            .map_err(ExpectedError::write_output_error)?;

        if overall.all_passed() {
            Ok(XtsExitCode::OK)
        } else {
            Err(ExpectedError::TestRunFailed)
        }
    }
}

/// A `NAME=PATH` argument to `xts aggregate`.
#[derive(Clone, Debug, Eq, PartialEq)]
struct LibraryArg {
    name: String,
    path: Utf8PathBuf,
}

impl FromStr for LibraryArg {
    type Err = LibraryArgParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(Self {
                name: name.to_owned(),
                path: path.into(),
            }),
            _ => Err(LibraryArgParseError {
                input: s.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Debug, Error)]
#[error("expected NAME=PATH, found `{input}`")]
struct LibraryArgParseError {
    input: String,
}

fn exec_declared(
    profile: &XtsProfile<'_>,
    root: Option<Utf8PathBuf>,
    format: OutputFormat,
    output: OutputContext,
    output_writer: &mut OutputWriter,
) -> Result<i32> {
    let root = root.unwrap_or_else(|| profile.test_root());
    // Skipped files were already logged by the scanner.
    let scan = profile.scanner().scan(&root)?;

    let mut writer = output_writer.stdout_writer();
    let res = match format {
        OutputFormat::Serializable(format) => format.write_line(&scan.suites, &mut writer),
        _ => make_displayer(output).write_declared(&scan.suites, &mut writer),
    };
    res.and_then(|()| writer.flush())
        .map_err(ExpectedError::write_output_error)?;

    if scan.suites.is_empty() {
        Err(ExpectedError::NoTestsDeclared { root })
    } else {
        Ok(XtsExitCode::OK)
    }
}

fn make_displayer(output: OutputContext) -> ResultDisplayer {
    let mut displayer = ResultDisplayer::new(output.verbose);
    if output.color.should_colorize(supports_color::Stream::Stdout) {
        displayer.colorize();
    }
    if supports_unicode::on(supports_unicode::Stream::Stdout) {
        displayer.use_unicode();
    }
    displayer
}

/// Reads a transcript from `path`, or from standard input if `path` is `None`.
fn read_transcript(path: Option<&Utf8Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .map_err(|err| ExpectedError::transcript_read_error(Some(path.to_owned()), err)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|err| ExpectedError::transcript_read_error(None, err))?;
            Ok(buf)
        }
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().map_err(ExpectedError::current_dir_error)?;
    Utf8PathBuf::try_from(dir).map_err(|err| ExpectedError::current_dir_error(err.into_io_error()))
}
