//! FP-Growth frequent-itemset mining
//!
//! Operates on index-encoded transactions (each a set of item indices) and
//! returns every itemset whose occurrence count reaches `min_count`. The
//! classic two-phase scheme: compress transactions into a prefix tree whose
//! paths are ordered by descending item frequency, then mine recursively by
//! projecting conditional pattern bases per item.
//!
//! Determinism: frequency ties in the path order are broken by item index,
//! so identical input always produces identical output, in the same order.

use std::collections::{BTreeMap, HashMap};

/// Index into the item universe built by the transaction encoder
pub type Item = u32;

/// An itemset together with its occurrence count
pub type CountedItemset = (Vec<Item>, usize);

struct FpNode {
    item: Item,
    count: usize,
    parent: usize,
    children: HashMap<Item, usize>,
}

/// Prefix tree over frequency-ordered transaction paths
///
/// Nodes live in an arena; `header` links every node carrying a given item
/// so conditional pattern bases can be collected without a tree walk.
struct FpTree {
    nodes: Vec<FpNode>,
    header: BTreeMap<Item, Vec<usize>>,
}

impl FpTree {
    fn new() -> Self {
        // Index 0 is the root; its item value is never read
        Self {
            nodes: vec![FpNode {
                item: Item::MAX,
                count: 0,
                parent: usize::MAX,
                children: HashMap::new(),
            }],
            header: BTreeMap::new(),
        }
    }

    fn insert(&mut self, path: &[Item], weight: usize) {
        let mut current = 0;
        for &item in path {
            let next = match self.nodes[current].children.get(&item) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(FpNode {
                        item,
                        count: 0,
                        parent: current,
                        children: HashMap::new(),
                    });
                    self.nodes[current].children.insert(item, child);
                    self.header.entry(item).or_default().push(child);
                    child
                }
            };
            self.nodes[next].count += weight;
            current = next;
        }
    }

    /// Items on the path from `node` (exclusive) up to the root, in
    /// root-to-leaf order
    fn prefix_path(&self, node: usize) -> Vec<Item> {
        let mut path = Vec::new();
        let mut current = self.nodes[node].parent;
        while current != 0 {
            path.push(self.nodes[current].item);
            current = self.nodes[current].parent;
        }
        path.reverse();
        path
    }
}

/// Mine all itemsets with occurrence count ≥ `min_count`
///
/// Transactions are treated as sets: duplicate items within one transaction
/// count once. A `min_count` of 0 is treated as 1. Empty input yields an
/// empty result.
pub fn fpgrowth(transactions: &[Vec<Item>], min_count: usize) -> Vec<CountedItemset> {
    let weighted: Vec<CountedItemset> = transactions
        .iter()
        .map(|t| {
            let mut items = t.clone();
            items.sort_unstable();
            items.dedup();
            (items, 1)
        })
        .collect();

    let mut out = Vec::new();
    mine_tree(&weighted, min_count.max(1), &[], &mut out);
    out
}

fn mine_tree(
    transactions: &[CountedItemset],
    min_count: usize,
    suffix: &[Item],
    out: &mut Vec<CountedItemset>,
) {
    let mut counts: BTreeMap<Item, usize> = BTreeMap::new();
    for (items, weight) in transactions {
        for &item in items {
            *counts.entry(item).or_insert(0) += weight;
        }
    }
    counts.retain(|_, count| *count >= min_count);
    if counts.is_empty() {
        return;
    }

    // Path order: descending frequency, ties by item index
    let mut order: Vec<Item> = counts.keys().copied().collect();
    order.sort_by(|a, b| counts[b].cmp(&counts[a]).then(a.cmp(b)));
    let rank: HashMap<Item, usize> = order.iter().enumerate().map(|(i, &item)| (item, i)).collect();

    let mut tree = FpTree::new();
    for (items, weight) in transactions {
        let mut path: Vec<Item> = items
            .iter()
            .copied()
            .filter(|item| counts.contains_key(item))
            .collect();
        path.sort_by_key(|item| rank[item]);
        if !path.is_empty() {
            tree.insert(&path, *weight);
        }
    }

    // Least frequent first, so each conditional base only contains items
    // that sort above the current one in the tree
    for &item in order.iter().rev() {
        let mut itemset = suffix.to_vec();
        itemset.push(item);
        out.push((itemset.clone(), counts[&item]));

        let mut base: Vec<CountedItemset> = Vec::new();
        if let Some(nodes) = tree.header.get(&item) {
            for &node in nodes {
                let path = tree.prefix_path(node);
                if !path.is_empty() {
                    base.push((path, tree.nodes[node].count));
                }
            }
        }
        if !base.is_empty() {
            mine_tree(&base, min_count, &itemset, out);
        }
    }
}
