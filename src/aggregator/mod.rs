//! Aggregation of parsed blocks into count tables.
//!
//! This module transforms scanned blocks into:
//! - A blocking-state table (goroutines per state label)
//! - A call-site table (blocks per state and normalized leading frame)

pub mod normalize;
pub mod stats;

// Re-export main types and functions
pub use normalize::normalize_call_site;
pub use stats::{CallSiteCount, StateCount, TraceStats};
