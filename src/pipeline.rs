//! Per-partition mining pipeline
//!
//! Chains the four stages for one data-scope partition: cluster raw events
//! into sessions, build sequences, mine frequent itemsets, label them. All
//! stages run synchronously on in-memory data; every value is created fresh
//! per run and handed read-only to the next stage.
//!
//! Empty input is not a crash: the stages themselves degrade to empty
//! output, and `run_partition` converts the two zero-data states into a
//! typed `NoData` error for the orchestration layer to escalate (log,
//! persist, halt the partition) however it sees fit.

use crate::cluster::cluster_events;
use crate::config::{ConfigError, MiningConfig};
use crate::event::EventRecord;
use crate::labeler::{label_itemsets, ItemCatalog, LabeledItemset};
use crate::mining::{mine, MiningRunSummary};
use crate::sequence::{build_sequences, Sequence};
use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

/// Errors for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The partition produced nothing to mine. Not a defect in the data
    /// plane; the caller decides whether to log, record, or halt.
    #[error("no data to process at {step}: {reason}")]
    NoData {
        step: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Labeled mining results plus run KPIs for one partition
#[derive(Debug, Clone)]
pub struct MiningReport {
    pub itemsets: Vec<LabeledItemset>,
    pub summary: MiningRunSummary,
}

/// Run the full pipeline for one partition of events
///
/// # Errors
/// * `PipelineError::Config` if the configuration fails validation; checked
///   before any data is touched, never retried.
/// * `PipelineError::NoData` if the partition has zero events, or zero
///   sequences survive singleton filtering.
pub fn run_partition(
    events: Vec<EventRecord>,
    config: &MiningConfig,
    catalog: &ItemCatalog,
) -> Result<MiningReport> {
    config.validate()?;

    if events.is_empty() {
        return Err(PipelineError::NoData {
            step: "clustering",
            reason: "partition contains no events".to_string(),
        });
    }

    let event_count = events.len();
    let clustered = cluster_events(events, config);
    let sequences = build_sequences(&clustered, config.keep_singletons);

    if sequences.is_empty() {
        return Err(PipelineError::NoData {
            step: "sequence_building",
            reason: format!(
                "no sequences left from {event_count} events (keep_singletons = {})",
                config.keep_singletons
            ),
        });
    }

    let unique_item_count = count_unique_items(&sequences);
    let outcome = mine(
        &sequences,
        config.min_support,
        unique_item_count,
        config.result_cap,
    );
    let summary = MiningRunSummary::compute(&sequences, &outcome);
    let itemsets = label_itemsets(outcome.itemsets, catalog);

    info!(
        events = event_count,
        sequences = summary.sequence_count,
        itemsets = summary.discovered_itemset_count,
        max_support = summary.max_support,
        "partition mined"
    );

    Ok(MiningReport { itemsets, summary })
}

/// Format a report for display
impl MiningReport {
    pub fn format(&self) -> String {
        let mut output = String::new();

        output.push_str("\n=== Frequent Itemset Mining Results ===\n");
        output.push_str(&format!("Sequences: {}\n", self.summary.sequence_count));
        output.push_str(&format!(
            "Mean items per sequence: {:.2}\n",
            self.summary.mean_items_per_sequence
        ));
        output.push_str(&format!(
            "Itemsets discovered: {}\n",
            self.summary.discovered_itemset_count
        ));
        output.push_str(&format!("Max support: {:.3}\n", self.summary.max_support));
        output.push_str(&format!(
            "Effective min support: {}\n",
            self.summary.effective_min_support
        ));

        if !self.itemsets.is_empty() {
            output.push_str("\nTop itemsets (by support):\n");
            for set in &self.itemsets {
                let rendered: Vec<String> = set
                    .itemset
                    .items
                    .iter()
                    .zip(&set.item_labels)
                    .map(|(item, label)| match label {
                        Some(name) => format!("{item} ({name})"),
                        None => item.clone(),
                    })
                    .collect();
                output.push_str(&format!(
                    "  - [{}] support: {:.3}, length: {}\n",
                    rendered.join(", "),
                    set.itemset.support,
                    set.itemset.pattern_length
                ));
            }
        }

        output
    }
}

fn count_unique_items(sequences: &[Sequence]) -> usize {
    sequences
        .iter()
        .flat_map(|s| s.items.iter())
        .collect::<HashSet<_>>()
        .len()
}
