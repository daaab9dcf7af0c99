use crate::config::{ClusterDimension, MiningConfig, MissingValuePolicy};
use crate::event::{ClusteredEvent, EventRecord};
use tracing::debug;

/// Assign a session (`cluster_index`) to every event
///
/// Input order does not matter: events are sorted by `(entity_id,
/// timestamp_s)` internally, with a stable sort so equal timestamps keep
/// their input order. Each entity partition is then reduced in a single
/// streaming pass carrying two scalar accumulators, `cumulative_gap` and
/// `cluster_index`:
///
/// - `delta` = chosen-dimension value minus the previous event's value
///   (0 for the first event of a partition)
/// - if `0 ≤ cumulative_gap + delta ≤ window_length` the event joins the
///   current session and the gap accumulates
/// - otherwise a new session starts with the event as its anchor
///   (`cumulative_gap` resets to 0)
///
/// A negative delta (out-of-order odometer readout, counter reset) always
/// fails the lower bound once the gap is 0, so it forces a new session
/// rather than producing a negative gap.
///
/// Empty input yields empty output.
pub fn cluster_events(mut events: Vec<EventRecord>, config: &MiningConfig) -> Vec<ClusteredEvent> {
    if config.missing_value == MissingValuePolicy::Drop {
        events.retain(|e| dimension_value(e, config.dimension).is_some());
    }

    // Chronological order within each entity partition. Sorting by timestamp
    // rather than the clustering dimension keeps DISTANCE clustering
    // well-defined when odometer values regress or are missing.
    events.sort_by(|a, b| {
        a.entity_id
            .cmp(&b.entity_id)
            .then(a.timestamp_s.total_cmp(&b.timestamp_s))
    });

    let total = events.len();
    let mut clustered = Vec::with_capacity(total);

    let mut current_entity: Option<String> = None;
    let mut prev_value: Option<f64> = None;
    let mut cumulative_gap = 0.0;
    let mut cluster_index = 0usize;
    let mut entity_count = 0usize;

    for event in events {
        if current_entity.as_deref() != Some(event.entity_id.as_str()) {
            current_entity = Some(event.entity_id.clone());
            prev_value = None;
            cumulative_gap = 0.0;
            cluster_index = 0;
            entity_count += 1;
        }

        let value = dimension_value(&event, config.dimension);
        let delta = match (prev_value, value) {
            (Some(prev), Some(curr)) => curr - prev,
            // Partition start, or a missing value under the zero-gap policy.
            // A missing value also voids the next event's delta (prev_value
            // stays None below), so one unreadable readout never fabricates
            // a gap spanning it.
            _ => 0.0,
        };

        if (0.0..=config.window_length).contains(&(cumulative_gap + delta)) {
            cumulative_gap += delta;
        } else {
            cluster_index += 1;
            cumulative_gap = 0.0;
        }

        prev_value = value;
        clustered.push(ClusteredEvent {
            event,
            cluster_index,
            cumulative_gap,
        });
    }

    debug!(
        events = total,
        entities = entity_count,
        dimension = ?config.dimension,
        window_length = config.window_length,
        "assigned session clusters"
    );

    clustered
}

fn dimension_value(event: &EventRecord, dimension: ClusterDimension) -> Option<f64> {
    let raw = match dimension {
        ClusterDimension::Time => Some(event.timestamp_s),
        ClusterDimension::Distance => event.odometer_km,
    };
    raw.filter(|v| !v.is_nan())
}
