// Session-to-sequence conversion
//
// Turns clustered events into the transaction unit fed to pattern mining:
// one ordered list of event ids per (entity, session), with optional
// filtering of single-event sequences.

mod builder;

pub use builder::{build_sequences, Sequence};
