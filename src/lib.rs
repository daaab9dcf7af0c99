//! Seqmine - Event-sequence session clustering and frequent-pattern mining
//!
//! This library provides the core of an event-history mining pipeline:
//! rolling-gap clustering of raw events into per-entity sessions,
//! conversion of sessions into ordered item sequences, FP-Growth frequent
//! itemset mining with support ranking, and label enrichment of the
//! discovered itemsets.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod event;
pub mod json_output;
pub mod labeler;
pub mod mining;
pub mod pipeline;
pub mod sequence;
