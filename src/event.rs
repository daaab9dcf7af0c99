//! Raw and clustered event records
//!
//! `EventRecord` is the input contract: one row of the per-partition event
//! history, already filtered to a single data scope by the loader.
//! `ClusteredEvent` is the same record annotated with its session assignment.

use serde::{Deserialize, Serialize};

/// One raw event as delivered by the input loader
///
/// Identity is not globally unique; uniqueness is only required per
/// `(entity_id, timestamp_s)` for gap computation to be meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Grouping key for ordering and clustering (e.g., a vehicle/device id)
    pub entity_id: String,

    /// Event type identifier, the item fed into pattern mining
    pub event_id: String,

    /// Identifier of the readout that captured this event
    pub readout_id: String,

    /// Event time as epoch seconds
    pub timestamp_s: f64,

    /// Odometer-like distance measure at event time, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer_km: Option<f64>,
}

/// An event with its session assignment attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredEvent {
    #[serde(flatten)]
    pub event: EventRecord,

    /// Session number within this event's entity partition, non-decreasing
    /// in chronological order
    pub cluster_index: usize,

    /// Accumulated gap (time or distance) since the session anchor
    pub cumulative_gap: f64,
}

impl ClusteredEvent {
    pub fn entity_id(&self) -> &str {
        &self.event.entity_id
    }

    pub fn event_id(&self) -> &str {
        &self.event.event_id
    }
}
