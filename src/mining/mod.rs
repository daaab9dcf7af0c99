//! Frequent-pattern mining over session sequences
//!
//! Pipeline stage three: encode sequences as set-membership transactions
//! over a deterministic item universe, run FP-Growth at the (possibly
//! overridden) support threshold, then rank, truncate, and summarize.

mod fpgrowth;

use crate::config::SUPPORT_OVERRIDE_CARDINALITY;
use crate::sequence::Sequence;
use fpgrowth::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

pub use fpgrowth::fpgrowth as mine_counted_itemsets;

/// Support threshold applied instead of the caller's value when the item
/// universe is large (matches the original pipeline's hard override)
pub const OVERRIDE_MIN_SUPPORT: f64 = 0.3;

/// A discovered itemset with its support fraction
///
/// `items` has set semantics but keeps the miner's stable discovery order;
/// the labeler relies on that order staying put.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub items: Vec<String>,
    /// Fraction of sequences containing this itemset, in (0, 1]
    pub support: f64,
    /// Number of events in the itemset
    pub pattern_length: usize,
}

/// Result of one mining run
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    /// Itemsets ranked by descending support, truncated to the result cap
    pub itemsets: Vec<FrequentItemset>,
    /// The support threshold actually applied, after any cardinality override
    pub effective_min_support: f64,
}

/// Aggregate KPIs for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningRunSummary {
    /// Sequences fed to the miner (post singleton filtering)
    pub sequence_count: usize,
    /// Mean sequence length, rounded to 2 decimals
    pub mean_items_per_sequence: f64,
    /// Itemsets returned after ranking and truncation
    pub discovered_itemset_count: usize,
    /// Highest support among returned itemsets, rounded to 3 decimals;
    /// 0.0 when nothing was discovered
    pub max_support: f64,
    /// Support threshold actually applied
    pub effective_min_support: f64,
}

impl MiningRunSummary {
    pub fn compute(sequences: &[Sequence], outcome: &MiningOutcome) -> Self {
        let sequence_count = sequences.len();
        let mean = if sequence_count == 0 {
            0.0
        } else {
            let total: usize = sequences.iter().map(Sequence::len).sum();
            total as f64 / sequence_count as f64
        };
        let max_support = outcome
            .itemsets
            .iter()
            .map(|set| set.support)
            .fold(0.0, f64::max);

        Self {
            sequence_count,
            mean_items_per_sequence: round_to(mean, 2),
            discovered_itemset_count: outcome.itemsets.len(),
            max_support: round_to(max_support, 3),
            effective_min_support: outcome.effective_min_support,
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Mine the most frequent itemsets across the given sequences
///
/// # Arguments
/// * `sequences` - session sequences; callers must treat an empty slice as a
///   no-data condition upstream, the miner itself returns an empty outcome
/// * `min_support` - caller's support threshold in (0, 1], validated at
///   config construction
/// * `unique_item_count` - size of the event-id universe for this partition;
///   above 300 the threshold is forced to 0.3 to bound the search
/// * `result_cap` - number of top-ranked itemsets to keep
pub fn mine(
    sequences: &[Sequence],
    min_support: f64,
    unique_item_count: usize,
    result_cap: usize,
) -> MiningOutcome {
    let effective_min_support = if unique_item_count > SUPPORT_OVERRIDE_CARDINALITY {
        warn!(
            unique_item_count,
            requested = min_support,
            forced = OVERRIDE_MIN_SUPPORT,
            "large item universe, forcing min_support to bound complexity"
        );
        OVERRIDE_MIN_SUPPORT
    } else {
        min_support
    };

    let (universe, transactions) = encode_transactions(sequences);
    if transactions.is_empty() {
        return MiningOutcome {
            itemsets: Vec::new(),
            effective_min_support,
        };
    }

    // Count threshold equivalent to support >= effective_min_support; the
    // epsilon absorbs float error in the product (e.g. 0.1 * 3)
    let n = transactions.len();
    let min_count = ((effective_min_support * n as f64 - 1e-9).ceil() as usize).max(1);

    let mut counted = mine_counted_itemsets(&transactions, min_count);

    // Stable: ties keep FP-Growth discovery order
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted.truncate(result_cap);

    let itemsets: Vec<FrequentItemset> = counted
        .into_iter()
        .map(|(items, count)| FrequentItemset {
            pattern_length: items.len(),
            items: items
                .into_iter()
                .map(|item| universe[item as usize].clone())
                .collect(),
            support: count as f64 / n as f64,
        })
        .collect();

    info!(
        sequences = n,
        unique_items = unique_item_count,
        itemsets = itemsets.len(),
        effective_min_support,
        "mined frequent itemsets"
    );

    MiningOutcome {
        itemsets,
        effective_min_support,
    }
}

/// One-hot-equivalent transaction encoding
///
/// The universe is the lexicographically sorted set of distinct event ids,
/// so index assignment is reproducible across runs. Each sequence becomes
/// the sorted, deduplicated set of its item indices.
fn encode_transactions(sequences: &[Sequence]) -> (Vec<String>, Vec<Vec<Item>>) {
    let mut universe: Vec<String> = sequences
        .iter()
        .flat_map(|s| s.items.iter().cloned())
        .collect();
    universe.sort_unstable();
    universe.dedup();

    let index: HashMap<&str, Item> = universe
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i as Item))
        .collect();

    let transactions = sequences
        .iter()
        .map(|sequence| {
            let mut t: Vec<Item> = sequence
                .items
                .iter()
                .map(|item| index[item.as_str()])
                .collect();
            t.sort_unstable();
            t.dedup();
            t
        })
        .collect();

    (universe, transactions)
}
