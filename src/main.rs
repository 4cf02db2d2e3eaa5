//! @ai:module:intent CLI entry point that records build diagnostics to a JSON Lines file
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on writer, source, config, output

use anyhow::{Context, Result};
use clap::Parser;
use issuesink::{output, run, source, IssueRecordWriter, LoggerConfig, SourceKind};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "issuesink")]
#[command(author, version, about = "Record build errors and warnings as normalized JSON Lines")]
struct Cli {
    /// Diagnostic stream to read; stdin when omitted
    input: Option<PathBuf>,

    /// Logger parameters: output file, optionally followed by `;`-separated extras
    #[arg(long, short)]
    parameters: Option<String>,

    /// Format of the diagnostic stream
    #[arg(long, short, value_enum)]
    source: Option<SourceKind>,

    /// Directory that file paths are made relative to (defaults to the current directory)
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Exit with code 1 if any error was recorded
    #[arg(long)]
    fail_on_error: bool,

    /// Do not print the summary
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("issuesink=warn")),
        )
        .init();

    let cli = Cli::parse();

    match execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// @ai:intent Merge CLI flags over the config file and run one logger lifecycle
/// @ai:effects fs:read, fs:write
fn execute(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => LoggerConfig::load(path)?,
        None => LoggerConfig::default(),
    };
    if cli.parameters.is_some() {
        config.parameters = cli.parameters;
    }
    if let Some(kind) = cli.source {
        config.source = kind;
    }
    if cli.working_dir.is_some() {
        config.working_dir = cli.working_dir;
    }
    config.fail_on_error |= cli.fail_on_error;

    let working_dir = match config.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };

    let mut writer = IssueRecordWriter::initialize(&working_dir, config.parameters.as_deref())?;
    let mut events = source::open_source(config.source, reader);
    let (summary, stats) = run(events.as_mut(), &mut writer)?;

    if !cli.quiet {
        eprint!("{}", output::format_summary(&summary, &stats, writer.path()));
    }

    if config.fail_on_error && summary.errors > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
