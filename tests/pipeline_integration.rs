// End-to-end pipeline tests: raw events through clustering, sequence
// building, mining, and labeling in one pass.

use seqmine::cluster::cluster_events;
use seqmine::config::{ClusterDimension, MiningConfig};
use seqmine::event::EventRecord;
use seqmine::labeler::ItemCatalog;
use seqmine::pipeline::{run_partition, PipelineError};
use seqmine::sequence::build_sequences;

fn event(entity: &str, event_id: &str, ts: f64, km: Option<f64>) -> EventRecord {
    EventRecord {
        entity_id: entity.to_string(),
        event_id: event_id.to_string(),
        readout_id: format!("r-{entity}-{ts}"),
        timestamp_s: ts,
        odometer_km: km,
    }
}

#[test]
fn distance_clustering_end_to_end() {
    // E1 at distances [0, 0.01, 0.5, 0.51] with a 0.05 km window: the jump
    // to 0.5 starts a second session, giving two sequences of length 2.
    let config = MiningConfig::new(0.05, ClusterDimension::Distance).unwrap();
    let events = vec![
        event("E1", "a", 0.0, Some(0.0)),
        event("E1", "b", 1.0, Some(0.01)),
        event("E1", "c", 2.0, Some(0.5)),
        event("E1", "d", 3.0, Some(0.51)),
    ];

    let clustered = cluster_events(events, &config);
    let indices: Vec<usize> = clustered.iter().map(|c| c.cluster_index).collect();
    assert_eq!(indices, vec![0, 0, 1, 1]);

    let sequences = build_sequences(&clustered, false);
    assert_eq!(sequences.len(), 2);
    assert!(sequences.iter().all(|s| s.len() == 2));
    assert_eq!(sequences[0].items, vec!["a", "b"]);
    assert_eq!(sequences[1].items, vec!["c", "d"]);
}

#[test]
fn full_run_produces_labeled_report() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time)
        .unwrap()
        .with_min_support(0.5)
        .unwrap();
    let catalog = ItemCatalog::from_rows([
        ("0x01", "Low voltage"),
        ("0x02", "Door contact"),
        ("0x03", "Check engine"),
    ]);

    // Three sessions: [0x01 0x02], [0x01 0x02], [0x01 0x03]
    let events = vec![
        event("V1", "0x01", 0.0, None),
        event("V1", "0x02", 10.0, None),
        event("V1", "0x01", 1000.0, None),
        event("V1", "0x02", 1010.0, None),
        event("V2", "0x01", 0.0, None),
        event("V2", "0x03", 10.0, None),
    ];

    let report = run_partition(events, &config, &catalog).unwrap();

    assert_eq!(report.summary.sequence_count, 3);
    assert_eq!(report.summary.mean_items_per_sequence, 2.0);
    assert_eq!(report.summary.max_support, 1.0);

    // {0x01} appears in every sequence
    let top = report
        .itemsets
        .iter()
        .find(|s| s.itemset.items == vec!["0x01"])
        .unwrap();
    assert_eq!(top.itemset.support, 1.0);
    assert_eq!(top.item_labels, vec![Some("Low voltage".to_string())]);

    // {0x03} sits at 1/3, below the 0.5 threshold
    assert!(report
        .itemsets
        .iter()
        .all(|s| !s.itemset.items.contains(&"0x03".to_string())));

    // Every itemset is labeled positionally
    for set in &report.itemsets {
        assert_eq!(set.item_labels.len(), set.itemset.items.len());
    }
}

#[test]
fn unlabeled_items_stay_in_report() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time).unwrap();
    // Catalog knows nothing
    let events = vec![
        event("V1", "0x01", 0.0, None),
        event("V1", "0x02", 10.0, None),
    ];

    let report = run_partition(events, &config, &ItemCatalog::new()).unwrap();
    assert!(!report.itemsets.is_empty());
    for set in &report.itemsets {
        assert!(set.item_labels.iter().all(Option::is_none));
        assert!(!set.itemset.items.is_empty());
    }
}

#[test]
fn pipeline_is_pure_over_input_order() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time).unwrap();
    let catalog = ItemCatalog::new();
    let events = vec![
        event("V2", "b", 15.0, None),
        event("V1", "a", 0.0, None),
        event("V2", "a", 5.0, None),
        event("V1", "b", 10.0, None),
    ];

    let mut shuffled = events.clone();
    shuffled.reverse();

    let first = run_partition(events, &config, &catalog).unwrap();
    let second = run_partition(shuffled, &config, &catalog).unwrap();

    assert_eq!(first.itemsets, second.itemsets);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn no_data_signals_are_typed() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time).unwrap();

    let empty = run_partition(Vec::new(), &config, &ItemCatalog::new());
    assert!(matches!(
        empty,
        Err(PipelineError::NoData {
            step: "clustering",
            ..
        })
    ));

    // One lone event per session, singletons dropped
    let sparse = run_partition(
        vec![event("V1", "a", 0.0, None), event("V1", "b", 5000.0, None)],
        &config,
        &ItemCatalog::new(),
    );
    assert!(matches!(
        sparse,
        Err(PipelineError::NoData {
            step: "sequence_building",
            ..
        })
    ));
}

#[test]
fn result_cap_limits_report_size() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time)
        .unwrap()
        .with_min_support(0.9)
        .unwrap()
        .with_result_cap(5)
        .unwrap();

    // One session of 4 distinct items: 15 itemsets all at support 1.0
    let events = vec![
        event("V1", "a", 0.0, None),
        event("V1", "b", 1.0, None),
        event("V1", "c", 2.0, None),
        event("V1", "d", 3.0, None),
    ];

    let report = run_partition(events, &config, &ItemCatalog::new()).unwrap();
    assert_eq!(report.itemsets.len(), 5);
    assert_eq!(report.summary.discovered_itemset_count, 5);
}

#[test]
fn time_clustering_splits_on_quiet_gaps() {
    let config = MiningConfig::new(60.0, ClusterDimension::Time).unwrap();
    let events = vec![
        event("V1", "a", 0.0, None),
        event("V1", "b", 30.0, None),
        event("V1", "c", 55.0, None), // 30 + 25 = 55 within window
        event("V1", "d", 90.0, None), // 55 + 35 = 90 exceeds it
        event("V1", "e", 100.0, None),
    ];

    let clustered = cluster_events(events, &config);
    let indices: Vec<usize> = clustered.iter().map(|c| c.cluster_index).collect();
    assert_eq!(indices, vec![0, 0, 0, 1, 1]);

    let sequences = build_sequences(&clustered, false);
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].items, vec!["a", "b", "c"]);
    assert_eq!(sequences[1].items, vec!["d", "e"]);
}
