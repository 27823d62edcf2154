//! Blocking-state and call-site tables.
//!
//! Both tables are built from a finished [`TraceScan`]: the state table is
//! the header count per label, the call-site table counts normalized
//! `(state, name)` pairs.

use super::normalize::normalize_call_site;
use crate::parser::TraceScan;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of headers carrying one state label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}

/// Number of blocks sharing a state and normalized call site
///
/// **Public** - row of the call-site table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSiteCount {
    /// Blocking-state label, possibly empty
    pub state: String,

    /// Normalized leading frame, possibly empty
    pub name: String,

    /// Occurrences
    pub count: u64,
}

impl CallSiteCount {
    pub fn new(state: impl Into<String>, name: impl Into<String>, count: u64) -> Self {
        Self {
            state: state.into(),
            name: name.into(),
            count,
        }
    }

    /// Both state and name are present
    pub fn is_complete(&self) -> bool {
        !self.state.is_empty() && !self.name.is_empty()
    }
}

/// Aggregated view of a whole dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Header counts keyed by label, sorted by label
    pub states: BTreeMap<String, u64>,

    /// Call-site rows, highest count first, ties in discovery order
    pub call_sites: Vec<CallSiteCount>,
}

impl TraceStats {
    /// Aggregate a finished scan
    pub fn from_scan(scan: &TraceScan) -> Self {
        let mut index: HashMap<(&str, String), usize> = HashMap::new();
        let mut call_sites: Vec<CallSiteCount> = Vec::new();

        for block in &scan.blocks {
            let key = (block.state.as_str(), normalize_call_site(&block.name));
            if let Some(&i) = index.get(&key) {
                call_sites[i].count += 1;
                continue;
            }
            call_sites.push(CallSiteCount::new(key.0, key.1.clone(), 1));
            index.insert(key, call_sites.len() - 1);
        }

        // Stable sort keeps discovery order among equal counts
        call_sites.sort_by(|a, b| b.count.cmp(&a.count));

        debug!(
            "Aggregated {} blocks into {} call sites",
            scan.blocks.len(),
            call_sites.len()
        );

        Self {
            states: scan.state_counts.clone(),
            call_sites,
        }
    }

    /// State table as rows
    pub fn state_rows(&self) -> Vec<StateCount> {
        self.states
            .iter()
            .map(|(state, &count)| StateCount {
                state: state.clone(),
                count,
            })
            .collect()
    }

    /// Sum of the state table
    pub fn total_states(&self) -> u64 {
        self.states.values().sum()
    }

    /// Sum of the call-site table
    pub fn total_call_sites(&self) -> u64 {
        self.call_sites.iter().map(|c| c.count).sum()
    }

    /// Split call sites into complete rows and rows missing state or name
    ///
    /// Both halves keep the sorted order.
    pub fn partition(&self) -> (Vec<&CallSiteCount>, Vec<&CallSiteCount>) {
        self.call_sites.iter().partition(|c| c.is_complete())
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "States: {} ({} goroutines) | Call sites: {} ({} blocks)",
            self.states.len(),
            self.total_states(),
            self.call_sites.len(),
            self.total_call_sites()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{scan_str, Block};

    fn scan_of(blocks: &[(&str, &str)]) -> TraceScan {
        TraceScan {
            blocks: blocks
                .iter()
                .map(|(state, name)| Block {
                    state: state.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sorted_descending() {
        let mut blocks = Vec::new();
        blocks.extend(std::iter::repeat(("s", "A")).take(5));
        blocks.extend(std::iter::repeat(("s", "B")).take(9));
        blocks.extend(std::iter::repeat(("s", "C")).take(1));

        let stats = TraceStats::from_scan(&scan_of(&blocks));
        let names: Vec<&str> = stats.call_sites.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let stats = TraceStats::from_scan(&scan_of(&[
            ("s", "z"),
            ("s", "a"),
            ("s", "m"),
            ("s", "a"),
            ("s", "z"),
            ("s", "m"),
        ]));
        let names: Vec<&str> = stats.call_sites.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_addresses_merge() {
        let stats = TraceStats::from_scan(&scan_of(&[
            ("idle", "pkg.f+0x10"),
            ("idle", "pkg.f+0x20"),
        ]));

        assert_eq!(stats.call_sites, vec![CallSiteCount::new("idle", "pkg.f", 2)]);
    }

    #[test]
    fn test_same_name_different_state_kept_apart() {
        let stats = TraceStats::from_scan(&scan_of(&[("a", "f"), ("b", "f")]));
        assert_eq!(stats.call_sites.len(), 2);
    }

    #[test]
    fn test_partition_incomplete() {
        let stats = TraceStats::from_scan(&scan_of(&[
            ("running", ""),
            ("running", "f"),
            ("", "g"),
        ]));
        let (complete, incomplete) = stats.partition();

        assert_eq!(complete.len(), 1);
        assert_eq!(complete[0].name, "f");
        assert_eq!(incomplete.len(), 2);
    }

    #[test]
    fn test_totals() {
        let scan = scan_str(
            "goroutine 1 [running]:\nf()\n\ngoroutine 2 [idle]:\ng()\n\ngoroutine 3 [idle]:\ng()\n",
        );
        let stats = TraceStats::from_scan(&scan);

        assert_eq!(stats.total_states(), 3);
        assert_eq!(stats.total_call_sites(), 3);
        assert_eq!(stats.states.get("idle"), Some(&2));
    }
}
