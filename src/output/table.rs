//! Column-aligned text report.
//!
//! Layout:
//!
//! ```text
//! chan receive 12
//! running      1
//! SUM: 13
//! chan receive | main.worker() | 12
//! running      |               | 1
//! SUM: 13
//! ```
//!
//! Call-site rows missing a state or a name follow the complete rows.

use crate::aggregator::{CallSiteCount, TraceStats};

/// Rows of cells padded to a common width per column
#[derive(Debug, Clone, Default)]
pub struct AlignedTable {
    rows: Vec<Vec<String>>,
    separator: &'static str,
}

impl AlignedTable {
    pub fn new(separator: &'static str) -> Self {
        Self {
            rows: Vec::new(),
            separator,
        }
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render every row; the last cell of a row is never padded
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }

        let mut out = String::new();
        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i == last {
                        cell.clone()
                    } else {
                        format!("{:<width$}", cell, width = widths[i])
                    }
                })
                .collect();
            out.push_str(&line.join(self.separator));
            out.push('\n');
        }
        out
    }
}

/// Render the state table followed by the call-site table
///
/// **Public** - default report written to stdout
pub fn render_report(stats: &TraceStats) -> String {
    let mut out = render_state_table(stats);
    out.push_str(&render_call_site_table(stats));
    out
}

/// State rows and their `SUM:` line
pub fn render_state_table(stats: &TraceStats) -> String {
    let mut table = AlignedTable::new(" ");
    for (state, count) in &stats.states {
        table.push_row([state.clone(), count.to_string()]);
    }

    let mut out = table.render();
    out.push_str(&format!("SUM: {}\n", stats.total_states()));
    out
}

/// Call-site rows, incomplete rows last, and their `SUM:` line
pub fn render_call_site_table(stats: &TraceStats) -> String {
    let (complete, incomplete) = stats.partition();

    let mut table = AlignedTable::new(" | ");
    for row in complete.into_iter().chain(incomplete) {
        table.push_row(call_site_cells(row));
    }

    let mut out = table.render();
    out.push_str(&format!("SUM: {}\n", stats.total_call_sites()));
    out
}

fn call_site_cells(row: &CallSiteCount) -> [String; 3] {
    [row.state.clone(), row.name.clone(), row.count.to_string()]
}
