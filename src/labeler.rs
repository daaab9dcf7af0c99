//! Human-readable labels for mined itemsets
//!
//! Raw event ids mean little to the people reading a mining report, so each
//! itemset is enriched with the event names from a metadata catalog. A
//! missing name is recoverable by design: the label slot stays empty and the
//! item is kept.

use crate::mining::FrequentItemset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Event-id to display-name catalog
///
/// Built from metadata rows; when the same id appears more than once, the
/// first row wins and later rows are ignored.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    names: HashMap<String, String>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(event_id, name)` rows, first match per id
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut names = HashMap::new();
        for (id, name) in rows {
            names.entry(id.into()).or_insert_with(|| name.into());
        }
        Self { names }
    }

    pub fn name(&self, event_id: &str) -> Option<&str> {
        self.names.get(event_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// An itemset with positionally aligned display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledItemset {
    #[serde(flatten)]
    pub itemset: FrequentItemset,
    /// One entry per item, in the itemset's own order; `None` when the
    /// catalog has no name for that id
    pub item_labels: Vec<Option<String>>,
}

/// Attach catalog names to every itemset
///
/// Items are iterated in the order the miner produced them, never re-sorted,
/// so labels align positionally with `itemset.items`. Lookup misses become
/// `None`; they are never an error and never drop the item.
pub fn label_itemsets(itemsets: Vec<FrequentItemset>, catalog: &ItemCatalog) -> Vec<LabeledItemset> {
    itemsets
        .into_iter()
        .map(|itemset| {
            let item_labels = itemset
                .items
                .iter()
                .map(|item| catalog.name(item).map(str::to_string))
                .collect();
            LabeledItemset {
                itemset,
                item_labels,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itemset(items: &[&str]) -> FrequentItemset {
        FrequentItemset {
            items: items.iter().map(|s| s.to_string()).collect(),
            support: 0.5,
            pattern_length: items.len(),
        }
    }

    #[test]
    fn test_labels_align_positionally() {
        let catalog = ItemCatalog::from_rows([("0x01", "Low battery"), ("0x02", "Door open")]);
        let labeled = label_itemsets(vec![itemset(&["0x02", "0x01"])], &catalog);

        assert_eq!(
            labeled[0].item_labels,
            vec![
                Some("Door open".to_string()),
                Some("Low battery".to_string())
            ]
        );
    }

    #[test]
    fn test_missing_lookup_yields_none_and_keeps_item() {
        let catalog = ItemCatalog::from_rows([("0x01", "Low battery")]);
        let labeled = label_itemsets(vec![itemset(&["0x01", "0x99"])], &catalog);

        assert_eq!(labeled[0].itemset.items.len(), 2);
        assert_eq!(labeled[0].item_labels.len(), 2);
        assert_eq!(labeled[0].item_labels[0].as_deref(), Some("Low battery"));
        assert_eq!(labeled[0].item_labels[1], None);
    }

    #[test]
    fn test_label_count_always_matches_item_count() {
        let catalog = ItemCatalog::new();
        let labeled = label_itemsets(
            vec![itemset(&["a"]), itemset(&["a", "b", "c"])],
            &catalog,
        );

        for set in &labeled {
            assert_eq!(set.item_labels.len(), set.itemset.items.len());
            assert!(set.item_labels.iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_duplicate_catalog_rows_first_wins() {
        let catalog = ItemCatalog::from_rows([("0x01", "First name"), ("0x01", "Second name")]);
        assert_eq!(catalog.name("0x01"), Some("First name"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_itemsets() {
        let catalog = ItemCatalog::from_rows([("a", "A")]);
        assert!(label_itemsets(Vec::new(), &catalog).is_empty());
    }

    #[test]
    fn test_item_order_not_resorted() {
        let catalog = ItemCatalog::new();
        let labeled = label_itemsets(vec![itemset(&["z", "a", "m"])], &catalog);
        assert_eq!(labeled[0].itemset.items, vec!["z", "a", "m"]);
    }
}
