//! Line-level state machine that turns dump text into blocks.
//!
//! The running state (current label, block-started flag) is carried across
//! chunk files, so a header at the very end of one chunk still tags the
//! frame line that opens the next chunk. A frame line that is itself cut
//! by a chunk boundary is not repaired: its first fragment becomes the
//! block name and the remainder is read as a continuation line.

use super::block::{Block, HeaderLine};
use crate::chunker::ChunkPlan;
use crate::utils::error::ScanError;
use log::{debug, info, trace};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parse state threaded through every line of every chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanState {
    /// Label of the most recent header, empty before the first one
    pub current_state: String,

    /// Whether the next non-blank line opens a new block
    pub block_started: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            current_state: String::new(),
            block_started: true,
        }
    }
}

/// What a single line did to the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Header with its state label
    Header(String),
    /// Header-shaped line without a usable label
    Skipped,
    /// Blank line
    Separator,
    /// Deeper frame of the current block
    Continuation,
    /// Leading frame of a new block
    Block(Block),
}

impl ScanState {
    /// Advance the state machine by one line
    pub fn feed(&mut self, line: &str) -> LineEvent {
        match HeaderLine::classify(line) {
            HeaderLine::Header(label) => {
                self.current_state = label.to_string();
                return LineEvent::Header(self.current_state.clone());
            }
            HeaderLine::Malformed => return LineEvent::Skipped,
            HeaderLine::NotHeader => {}
        }

        if line.trim().is_empty() {
            self.block_started = true;
            return LineEvent::Separator;
        }

        if !self.block_started {
            return LineEvent::Continuation;
        }

        self.block_started = false;
        LineEvent::Block(Block::from_frame(&self.current_state, line))
    }
}

/// Result of scanning a whole dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceScan {
    /// Header occurrences per state label
    pub state_counts: BTreeMap<String, u64>,

    /// Captured blocks in discovery order
    pub blocks: Vec<Block>,

    /// Header-shaped lines that were skipped
    pub skipped_headers: u64,

    /// Lines read across all inputs
    pub lines: u64,
}

impl TraceScan {
    /// Total header occurrences
    pub fn total_headers(&self) -> u64 {
        self.state_counts.values().sum()
    }
}

/// Accumulates a [`TraceScan`] over one or more inputs
///
/// **Public** - main entry point for parsing
#[derive(Debug, Default)]
pub struct TraceScanner {
    state: ScanState,
    scan: TraceScan,
}

impl TraceScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parse state
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Process one line
    pub fn feed_line(&mut self, line: &str) {
        self.scan.lines += 1;
        match self.state.feed(line) {
            LineEvent::Header(label) => {
                *self.scan.state_counts.entry(label).or_insert(0) += 1;
            }
            LineEvent::Skipped => {
                trace!("Skipping malformed header: {:?}", line);
                self.scan.skipped_headers += 1;
            }
            LineEvent::Block(block) => self.scan.blocks.push(block),
            LineEvent::Separator | LineEvent::Continuation => {}
        }
    }

    /// Process every line of `reader`
    ///
    /// Lines are read as raw bytes and decoded lossily so that a chunk cut
    /// inside a multi-byte character does not abort the scan.
    ///
    /// # Returns
    /// Number of lines read
    pub fn scan_reader<R: BufRead>(&mut self, mut reader: R) -> io::Result<u64> {
        let mut buf = Vec::new();
        let mut count = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(trim_line_ending(&buf));
            self.feed_line(&line);
            count += 1;
        }

        Ok(count)
    }

    /// Scan one file, keeping state from previous inputs
    pub fn scan_file(&mut self, path: &Path) -> Result<u64, ScanError> {
        let file = File::open(path).map_err(|source| ScanError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let lines = self
            .scan_reader(BufReader::new(file))
            .map_err(|source| ScanError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Scanned {} ({} lines, {} blocks so far)",
            path.display(),
            lines,
            self.scan.blocks.len()
        );
        Ok(lines)
    }

    /// Finish and return the accumulated scan
    pub fn finish(self) -> TraceScan {
        self.scan
    }
}

/// Scan every chunk of `plan` in index order
///
/// # Errors
/// * `ScanError::OpenFailed` - a chunk is missing
/// * `ScanError::ReadFailed` - a chunk cannot be read
pub fn scan_chunks(plan: &ChunkPlan) -> Result<TraceScan, ScanError> {
    let mut scanner = TraceScanner::new();

    // Written range only; see `ChunkPlan::written_parts`
    for path in plan.chunk_paths() {
        scanner.scan_file(&path)?;
    }

    let scan = scanner.finish();
    info!(
        "Scanned {} lines: {} headers, {} blocks",
        scan.lines,
        scan.total_headers(),
        scan.blocks.len()
    );
    Ok(scan)
}

/// Scan an in-memory dump
pub fn scan_str(text: &str) -> TraceScan {
    let mut scanner = TraceScanner::new();
    scanner
        .scan_reader(text.as_bytes())
        .expect("reading from a byte slice cannot fail");
    scanner.finish()
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
