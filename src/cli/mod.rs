//! CLI command definitions and handlers

mod init;
mod report;
mod show;
mod submit;

use crate::config::GaugeConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate the forward timeout (1-60 seconds)
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("timeout must be at least 1 second".to_string())
    } else if n > 60 {
        Err("timeout cannot exceed 60 seconds".to_string())
    } else {
        Ok(n)
    }
}

/// Gemgauge - package quality metrics for the GemHub registry
///
/// Ingests benchmark runs and vulnerability scans, scores packages 0-100,
/// and publishes quality reports to the registry.
#[derive(Parser, Debug)]
#[command(name = "gemgauge")]
#[command(
    version,
    about = "Package quality metrics pipeline — ingest benchmarks and vulnerability scans, score packages, publish reports",
    after_help = "\
Examples:
  gemgauge init                                      Write a starter gemgauge.toml
  gemgauge submit-bench rails --file bench.json      Ingest a benchmark run
  gemgauge submit-scan rails --file findings.json    Ingest a vulnerability scan
  gemgauge report rails                              Score, persist, and forward a report
  gemgauge report rails --format json --no-forward   Score locally, JSON to stdout
  gemgauge show rails --format markdown              Print the latest persisted report

Data lives under ~/.cache/gemgauge by default; set data_dir in gemgauge.toml
or GEMGAUGE_DATA_DIR to override."
)]
pub struct Cli {
    /// Config file path (default: ./gemgauge.toml, then user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true, env = "GEMGAUGE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter gemgauge.toml config file with example settings
    Init,

    /// Ingest one benchmark run for a package
    #[command(after_help = "\
The input file is a JSON object mapping operation name to measurements:
  {\"push\": {\"throughput\": 125000.0, \"variance\": 0.03},
   \"pull\": {\"throughput\": 98000.0, \"variance\": 0.05}}

Throughput and variance must be non-negative; at least one operation is
required. Malformed submissions are rejected without writing anything.")]
    SubmitBench {
        /// Package the benchmark was run against
        package: String,

        /// JSON file with the measurements
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Ingest one vulnerability scan for a package
    #[command(after_help = "\
The input file is a JSON array of findings:
  [{\"id\": \"CVE-2024-1234\", \"severity\": \"high\",
    \"affected_range\": \"7.0.0\", \"patched_range\": \"7.0.4\"}]

An empty array records a clean scan. Unrecognized severity strings are
normalized to \"unknown\", never rejected.")]
    SubmitScan {
        /// Package the scan was run against
        package: String,

        /// JSON file with the findings
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Generate a quality report: score, persist, forward to the registry
    #[command(after_help = "\
Examples:
  gemgauge report rails                       Text report, forward if configured
  gemgauge report rails --format json         JSON for scripting
  gemgauge report rails --no-forward          Skip the registry sink
  gemgauge report rails -o report.md --format md")]
    Report {
        /// Package to score
        package: String,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Do not forward the report to the registry sink
        #[arg(long)]
        no_forward: bool,

        /// Forward timeout in seconds (1-60)
        #[arg(long, value_parser = parse_timeout)]
        timeout: Option<u64>,
    },

    /// Print the most recent persisted report for a package
    Show {
        /// Package to look up
        package: String,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,
    },
}

/// Load config honoring the global --config/--data-dir flags.
fn load_config(cli: &Cli) -> Result<GaugeConfig> {
    let mut config = match &cli.config {
        Some(path) => GaugeConfig::load_from(path)?,
        None => GaugeConfig::load()?,
    };
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Init => init::run(),

        Commands::SubmitBench { ref package, ref file } => {
            submit::run_bench(&config, package, file)
        }

        Commands::SubmitScan { ref package, ref file } => {
            submit::run_scan(&config, package, file)
        }

        Commands::Report {
            ref package,
            ref format,
            ref output,
            no_forward,
            timeout,
        } => report::run(
            &config,
            package,
            format,
            output.as_deref(),
            no_forward,
            timeout,
        ),

        Commands::Show {
            ref package,
            ref format,
        } => show::run(&config, package, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_bounds() {
        assert_eq!(parse_timeout("5"), Ok(5));
        assert_eq!(parse_timeout("60"), Ok(60));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("61").is_err());
        assert!(parse_timeout("abc").is_err());
    }

    #[test]
    fn test_cli_parses_report_command() {
        let cli = Cli::try_parse_from([
            "gemgauge",
            "report",
            "rails",
            "--format",
            "json",
            "--no-forward",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                package,
                format,
                no_forward,
                ..
            } => {
                assert_eq!(package, "rails");
                assert_eq!(format, "json");
                assert!(no_forward);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_format() {
        assert!(Cli::try_parse_from(["gemgauge", "report", "rails", "--format", "xml"]).is_err());
    }
}
