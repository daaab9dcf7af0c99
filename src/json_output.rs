//! JSON output format for mining reports
//!
//! Stable machine-readable shape for the `--format json` path, decoupled
//! from the internal result types so those can evolve without breaking
//! downstream consumers.

use crate::labeler::LabeledItemset;
use crate::mining::MiningRunSummary;
use crate::pipeline::MiningReport;
use serde::{Deserialize, Serialize};

/// One labeled itemset row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonItemset {
    /// Event ids in miner order
    pub items: Vec<String>,
    /// Display names aligned with `items`; null where no name was found
    pub item_labels: Vec<Option<String>>,
    /// Fraction of sequences containing this itemset
    pub support: f64,
    /// Number of events in the itemset
    pub pattern_length: usize,
}

/// Aggregate KPIs of the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRunSummary {
    pub sequence_count: usize,
    pub mean_items_per_sequence: f64,
    pub discovered_itemset_count: usize,
    pub max_support: f64,
    pub effective_min_support: f64,
}

/// Complete report for one partition run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMiningReport {
    pub summary: JsonRunSummary,
    pub itemsets: Vec<JsonItemset>,
}

impl From<&LabeledItemset> for JsonItemset {
    fn from(set: &LabeledItemset) -> Self {
        Self {
            items: set.itemset.items.clone(),
            item_labels: set.item_labels.clone(),
            support: set.itemset.support,
            pattern_length: set.itemset.pattern_length,
        }
    }
}

impl From<&MiningRunSummary> for JsonRunSummary {
    fn from(summary: &MiningRunSummary) -> Self {
        Self {
            sequence_count: summary.sequence_count,
            mean_items_per_sequence: summary.mean_items_per_sequence,
            discovered_itemset_count: summary.discovered_itemset_count,
            max_support: summary.max_support,
            effective_min_support: summary.effective_min_support,
        }
    }
}

impl From<&MiningReport> for JsonMiningReport {
    fn from(report: &MiningReport) -> Self {
        Self {
            summary: (&report.summary).into(),
            itemsets: report.itemsets.iter().map(JsonItemset::from).collect(),
        }
    }
}
