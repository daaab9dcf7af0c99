// Rolling-gap session clustering
//
// Groups each entity's chronologically ordered events into bounded sessions:
// a session absorbs events while the accumulated gap in the chosen dimension
// (elapsed time or elapsed distance) stays within the configured window, and
// a new session starts the moment it would leave [0, window_length].
//
// Key invariant: entity partitions are fully independent. Interleaving one
// entity's events with another's never changes either entity's assignments.

mod gap;

pub use gap::cluster_events;
