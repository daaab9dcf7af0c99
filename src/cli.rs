//! CLI argument parsing for seqmine

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for mining reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format for machine parsing (default)
    Json,
    /// Human-readable text format
    Text,
}

/// Clustering dimension selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DimensionArg {
    /// Session gaps measured in seconds
    Time,
    /// Session gaps measured in kilometres
    Distance,
}

#[derive(Parser, Debug)]
#[command(name = "seqmine")]
#[command(version)]
#[command(
    about = "Session clustering and frequent-pattern mining over event histories",
    long_about = None
)]
pub struct Cli {
    /// Newline-delimited JSON file of event records for one partition
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// TOML configuration file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON object mapping event ids to display names
    #[arg(long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Session window length in the unit of the clustering dimension
    #[arg(long = "window-length", value_name = "LEN")]
    pub window_length: Option<f64>,

    /// Clustering dimension (time or distance)
    #[arg(long = "dimension", value_enum)]
    pub dimension: Option<DimensionArg>,

    /// Minimum support fraction for itemset mining, in (0, 1]
    #[arg(long = "min-support", value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Keep single-event sequences instead of dropping them
    #[arg(long = "keep-singletons")]
    pub keep_singletons: bool,

    /// Number of top-ranked itemsets to return
    #[arg(long = "result-cap", value_name = "N")]
    pub result_cap: Option<usize>,

    /// Enable verbose tracing output on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
