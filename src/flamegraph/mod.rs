//! Flamegraph rendering of the call-site table.
//!
//! Converts (state, call site) counts into an SVG where each frame's width
//! is the share of goroutines parked there.

pub mod generator;

// Re-export main types
pub use generator::{generate_flamegraph, FlamegraphConfig};
