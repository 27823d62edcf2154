//! JSON report schema.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{CallSiteCount, StateCount, TraceStats};
use crate::utils::config::REPORT_SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dump that was analyzed
    pub source: String,

    /// Chunk size used for the scan
    pub chunk_size: u64,

    /// Chunk files scanned
    pub chunks: u64,

    /// Goroutines per blocking state
    pub states: Vec<StateCount>,

    /// Sum of `states`
    pub total_states: u64,

    /// Blocks per state and call site, highest count first
    pub call_sites: Vec<CallSiteCount>,

    /// Sum of `call_sites`
    pub total_call_sites: u64,

    /// Header-shaped lines that were skipped
    pub skipped_headers: u64,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Scan details recorded alongside the tables
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    pub source: String,
    pub chunk_size: u64,
    pub chunks: u64,
    pub skipped_headers: u64,
}

impl Report {
    /// Build a report stamped with the current time
    pub fn new(stats: &TraceStats, meta: ReportMeta) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION.to_string(),
            source: meta.source,
            chunk_size: meta.chunk_size,
            chunks: meta.chunks,
            states: stats.state_rows(),
            total_states: stats.total_states(),
            call_sites: stats.call_sites.clone(),
            total_call_sites: stats.total_call_sites(),
            skipped_headers: meta.skipped_headers,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
