use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use svcgraph::core::{CycleMode, DeclarationLoader};
use svcgraph::formatters::JsonReportFormatter;
use svcgraph::utils::logger::init_cli_logger;
use svcgraph::AnalyzerConfig;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "svcgraph",
    version = "0.1.0",
    author = "svcgraph developers",
    about = "Service dependency graph analysis for declared module capabilities"
)]
struct Cli {
    /// JSON file with the extracted service declarations
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output file path (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append validation summaries and count violations
    #[arg(long)]
    validate: bool,

    /// Exit with a failure status when required services are missing or cycles exist
    #[arg(long, requires = "validate")]
    fail_on_violations: bool,

    /// Omit empty Provides/Requires sections
    #[arg(long)]
    hide_empty: bool,

    /// Cycle search strategy
    #[arg(long, value_enum)]
    cycle_mode: Option<CycleModeArg>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum CycleModeArg {
    FirstPerRoot,
    AllBackEdges,
}

impl From<CycleModeArg> for CycleMode {
    fn from(arg: CycleModeArg) -> Self {
        match arg {
            CycleModeArg::FirstPerRoot => CycleMode::FirstPerRoot,
            CycleModeArg::AllBackEdges => CycleMode::AllBackEdges,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);
    run(cli)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let start_time = Instant::now();

    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if cli.validate {
        config.validate = true;
    }
    if cli.hide_empty {
        config.show_empty_sections = false;
    }
    if let Some(mode) = cli.cycle_mode {
        config.cycle_mode = mode.into();
    }

    let declarations = DeclarationLoader::new()
        .load_file(&cli.input)
        .with_context(|| format!("reading declarations from {}", cli.input.display()))?;

    let analyzer = config.analyzer()?;
    let report = analyzer.analyze(declarations);

    let rendered = match cli.format {
        OutputFormat::Text => report.text.clone(),
        OutputFormat::Json => JsonReportFormatter::new().with_pretty(true).format(&report)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    info!(elapsed = ?start_time.elapsed(), "done");

    if cli.fail_on_violations && !report.is_valid() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
