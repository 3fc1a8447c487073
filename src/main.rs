//! ftm-trilateration CLI
//!
//! Solves the relative layout of four stations either from six measured
//! ranges or from known coordinates (ranges are derived first).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{info, warn, Level};

use ftm_trilateration::api::{CsvFormatter, JsonFormatter, OutputFormat, SolutionFormatter, TextFormatter};
use ftm_trilateration::utils::{ConfigError, ConfigurationManager, SolverConfig};
use ftm_trilateration::{CoordinateSet, DistanceSet, SolverError, SolverInput, StationSolver};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable report
    Text,
    /// JSON document
    Json,
    /// One CSV row per station
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Parser)]
#[command(name = "ftm-trilateration")]
#[command(about = "Estimate relative positions of four stations from pairwise ranges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Decimals kept in the report
    #[arg(long, global = true)]
    precision: Option<u8>,

    /// Include sign estimation details and range residuals
    #[arg(long, global = true)]
    diagnostics: bool,

    /// Single-line text output
    #[arg(long, global = true)]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Derive ranges from known station coordinates, then solve
    Coordinates(CoordinateArgs),
    /// Solve from six measured ranges
    Distances(DistanceArgs),
}

#[derive(Args)]
struct CoordinateArgs {
    /// X0 coordinate
    #[arg(long, allow_negative_numbers = true)]
    x0: f64,
    /// Y0 coordinate
    #[arg(long, allow_negative_numbers = true)]
    y0: f64,
    /// X1 coordinate
    #[arg(long, allow_negative_numbers = true)]
    x1: f64,
    /// Y1 coordinate
    #[arg(long, allow_negative_numbers = true)]
    y1: f64,
    /// X2 coordinate
    #[arg(long, allow_negative_numbers = true)]
    x2: f64,
    /// Y2 coordinate
    #[arg(long, allow_negative_numbers = true)]
    y2: f64,
    /// X3 coordinate
    #[arg(long, allow_negative_numbers = true)]
    x3: f64,
    /// Y3 coordinate
    #[arg(long, allow_negative_numbers = true)]
    y3: f64,
}

impl CoordinateArgs {
    fn to_coordinates(&self) -> CoordinateSet {
        CoordinateSet::from_array([self.x0, self.y0, self.x1, self.y1, self.x2, self.y2, self.x3, self.y3])
    }
}

#[derive(Args)]
struct DistanceArgs {
    /// D01 distance
    #[arg(long, allow_negative_numbers = true)]
    d01: f64,
    /// D02 distance
    #[arg(long, allow_negative_numbers = true)]
    d02: f64,
    /// D03 distance
    #[arg(long, allow_negative_numbers = true)]
    d03: f64,
    /// D12 distance
    #[arg(long, allow_negative_numbers = true)]
    d12: f64,
    /// D13 distance
    #[arg(long, allow_negative_numbers = true)]
    d13: f64,
    /// D23 distance
    #[arg(long, allow_negative_numbers = true)]
    d23: f64,
}

impl DistanceArgs {
    fn to_distances(&self) -> DistanceSet {
        DistanceSet::new(self.d01, self.d02, self.d03, self.d12, self.d13, self.d23)
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Solver(#[from] SolverError),
    #[error("failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

fn verbosity_level(verbose: u8) -> Option<Level> {
    match verbose {
        0 => None,
        1 => Some(Level::INFO),
        2 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Load the configuration file and apply command-line overrides
///
/// Warnings of the merged configuration are handed back so they can be
/// logged once the subscriber is installed.
fn load_config(cli: &Cli) -> Result<(SolverConfig, Vec<String>), CliError> {
    let mut manager = match &cli.config {
        Some(path) => ConfigurationManager::from_file(path)?,
        None => ConfigurationManager::new(),
    };

    if let Some(format) = cli.format {
        manager.set_output_format(format.into());
    }
    if let Some(precision) = cli.precision {
        manager.set_precision(precision)?;
    }
    if cli.diagnostics {
        manager.set_include_diagnostics(true);
    }
    if let Some(level) = verbosity_level(cli.verbose) {
        manager.set_log_level(level);
    }
    if cli.compact {
        let mut config = manager.config().clone();
        config.output.compact = true;
        manager.update_config(config)?;
    }

    let warnings = ConfigurationManager::validate_config(manager.config()).warnings;
    Ok((manager.config().clone(), warnings))
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (config, warnings) = load_config(&cli)?;
    init_logging(config.level()?);
    for warning in &warnings {
        warn!("{}", warning);
    }

    let (mode, input) = match &cli.command {
        Command::Coordinates(args) => ("coordinates", SolverInput::Coordinates(args.to_coordinates())),
        Command::Distances(args) => ("distances", SolverInput::Distances(args.to_distances())),
    };
    info!(mode, "solving station layout");

    let solution = StationSolver::new().solve(&input)?;

    let output = &config.output;
    let formatter = if output.include_diagnostics {
        SolutionFormatter::with_diagnostics()
    } else {
        SolutionFormatter::new()
    };
    let formatted = formatter
        .with_precision(output.precision)
        .with_consistency_tolerance(config.consistency_tolerance_m)
        .format(&solution);

    let rendered = match output.format {
        OutputFormat::Text => {
            let text = TextFormatter {
                include_diagnostics: output.include_diagnostics,
                compact: output.compact,
                precision: output.precision as usize,
            }
            .format_text(&formatted);
            if output.compact {
                text
            } else {
                format!("Simulation Mode: {}\n\n{}", mode, text)
            }
        }
        OutputFormat::Json => JsonFormatter { pretty: output.pretty_json }.format_json(&formatted)?,
        OutputFormat::Csv => CsvFormatter::new().format_csv(&formatted),
    };

    println!("{}", rendered);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
