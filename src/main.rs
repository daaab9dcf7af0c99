use anyhow::{bail, Context, Result};
use clap::Parser;
use seqmine::{
    cli::{Cli, DimensionArg, OutputFormat},
    config::{ClusterDimension, MiningConfig},
    event::EventRecord,
    json_output::JsonMiningReport,
    labeler::ItemCatalog,
    pipeline,
};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the run configuration from the optional TOML file plus CLI overrides
fn build_config(cli: &Cli) -> Result<MiningConfig> {
    let mut config = match &cli.config {
        Some(path) => MiningConfig::from_toml(path)?,
        None => {
            let (Some(window_length), Some(dimension)) = (cli.window_length, cli.dimension) else {
                bail!("without --config, both --window-length and --dimension are required");
            };
            MiningConfig::new(window_length, dimension_from_arg(dimension))?
        }
    };

    if let Some(window_length) = cli.window_length {
        config.window_length = window_length;
    }
    if let Some(dimension) = cli.dimension {
        config.dimension = dimension_from_arg(dimension);
    }
    if let Some(min_support) = cli.min_support {
        config = config.with_min_support(min_support)?;
    }
    if cli.keep_singletons {
        config = config.with_keep_singletons(true);
    }
    if let Some(result_cap) = cli.result_cap {
        config = config.with_result_cap(result_cap)?;
    }

    config.validate()?;
    Ok(config)
}

fn dimension_from_arg(arg: DimensionArg) -> ClusterDimension {
    match arg {
        DimensionArg::Time => ClusterDimension::Time,
        DimensionArg::Distance => ClusterDimension::Distance,
    }
}

/// Read newline-delimited JSON event records
fn load_events(path: &Path) -> Result<Vec<EventRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read events file: {}", path.display()))?;

    let mut events = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: EventRecord = serde_json::from_str(line)
            .with_context(|| format!("invalid event record at {}:{}", path.display(), number + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Read the event-id to display-name catalog, when provided
fn load_catalog(path: Option<&Path>) -> Result<ItemCatalog> {
    let Some(path) = path else {
        return Ok(ItemCatalog::new());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read labels file: {}", path.display()))?;
    let names: HashMap<String, String> = serde_json::from_str(&content)
        .with_context(|| format!("invalid labels file: {}", path.display()))?;

    Ok(ItemCatalog::from_rows(names))
}

fn write_report(cli: &Cli, report: &pipeline::MiningReport) -> Result<()> {
    let rendered = match cli.format {
        OutputFormat::Json => {
            let json_report = JsonMiningReport::from(report);
            serde_json::to_string_pretty(&json_report)?
        }
        OutputFormat::Text => report.format(),
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{rendered}")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let events = load_events(&cli.events)?;
    let catalog = load_catalog(cli.labels.as_deref())?;

    let report = pipeline::run_partition(events, &config, &catalog)
        .context("mining pipeline failed for this partition")?;

    write_report(&cli, &report)
}
