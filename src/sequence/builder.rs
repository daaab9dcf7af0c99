use crate::event::ClusteredEvent;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The ordered event ids of one session, the transaction unit for mining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub entity_id: String,
    pub cluster_index: usize,
    /// Event ids in chronological order within the session
    pub items: Vec<String>,
}

impl Sequence {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group clustered events into per-session sequences
///
/// Events are grouped by `(entity_id, cluster_index)` in the order groups
/// first appear; since the clusterer emits entity/time-sorted output, each
/// group is a contiguous run and item order inside a sequence is the
/// chronological order of its events. With `keep_singletons = false`,
/// sequences of length ≤ 1 are dropped (a lone event cannot contribute a
/// co-occurrence pattern).
pub fn build_sequences(clustered: &[ClusteredEvent], keep_singletons: bool) -> Vec<Sequence> {
    let mut sequences: Vec<Sequence> = Vec::new();

    for event in clustered {
        match sequences.last_mut() {
            Some(current)
                if current.entity_id == event.entity_id()
                    && current.cluster_index == event.cluster_index =>
            {
                current.items.push(event.event_id().to_string());
            }
            _ => sequences.push(Sequence {
                entity_id: event.entity_id().to_string(),
                cluster_index: event.cluster_index,
                items: vec![event.event_id().to_string()],
            }),
        }
    }

    let before = sequences.len();
    if !keep_singletons {
        sequences.retain(|s| s.len() > 1);
    }

    debug!(
        sequences = sequences.len(),
        singletons_dropped = before - sequences.len(),
        "built session sequences"
    );

    sequences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventRecord;

    fn clustered(entity: &str, event_id: &str, ts: f64, cluster_index: usize) -> ClusteredEvent {
        ClusteredEvent {
            event: EventRecord {
                entity_id: entity.to_string(),
                event_id: event_id.to_string(),
                readout_id: "r".to_string(),
                timestamp_s: ts,
                odometer_km: None,
            },
            cluster_index,
            cumulative_gap: 0.0,
        }
    }

    #[test]
    fn test_groups_by_entity_and_cluster() {
        let events = vec![
            clustered("A", "a1", 0.0, 0),
            clustered("A", "a2", 1.0, 0),
            clustered("A", "a3", 100.0, 1),
            clustered("A", "a4", 101.0, 1),
            clustered("B", "b1", 0.0, 0),
            clustered("B", "b2", 1.0, 0),
        ];

        let sequences = build_sequences(&events, true);
        assert_eq!(sequences.len(), 3);
        assert_eq!(sequences[0].items, vec!["a1", "a2"]);
        assert_eq!(sequences[1].items, vec!["a3", "a4"]);
        assert_eq!(sequences[1].cluster_index, 1);
        assert_eq!(sequences[2].entity_id, "B");
    }

    #[test]
    fn test_items_preserve_chronological_order() {
        let events = vec![
            clustered("A", "first", 0.0, 0),
            clustered("A", "second", 1.0, 0),
            clustered("A", "third", 2.0, 0),
        ];

        let sequences = build_sequences(&events, true);
        assert_eq!(sequences[0].items, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_singletons_dropped_by_default_policy() {
        let events = vec![
            clustered("A", "a1", 0.0, 0),
            clustered("A", "a2", 100.0, 1),
            clustered("A", "a3", 101.0, 1),
        ];

        let sequences = build_sequences(&events, false);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].items, vec!["a2", "a3"]);
        assert!(sequences.iter().all(|s| s.len() > 1));
    }

    #[test]
    fn test_singletons_kept_when_requested() {
        let events = vec![
            clustered("A", "a1", 0.0, 0),
            clustered("A", "a2", 100.0, 1),
        ];

        let sequences = build_sequences(&events, true);
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].len(), 1);
    }

    #[test]
    fn test_length_matches_item_count() {
        let events = vec![
            clustered("A", "a1", 0.0, 0),
            clustered("A", "a2", 1.0, 0),
            clustered("A", "a3", 2.0, 0),
        ];

        for sequence in build_sequences(&events, true) {
            assert_eq!(sequence.len(), sequence.items.len());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(build_sequences(&[], false).is_empty());
        assert!(build_sequences(&[], true).is_empty());
    }

    #[test]
    fn test_same_cluster_index_different_entity_not_merged() {
        // cluster_index restarts at 0 per entity; grouping must still split
        let events = vec![
            clustered("A", "a1", 0.0, 0),
            clustered("A", "a2", 1.0, 0),
            clustered("B", "b1", 0.0, 0),
            clustered("B", "b2", 1.0, 0),
        ];

        let sequences = build_sequences(&events, false);
        assert_eq!(sequences.len(), 2);
        assert_ne!(sequences[0].entity_id, sequences[1].entity_id);
    }
}
