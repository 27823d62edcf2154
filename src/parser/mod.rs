//! Goroutine dump parsing.
//!
//! This module handles:
//! - Recognising goroutine header lines and their state labels
//! - Splitting the line stream into blocks
//! - Carrying parse state across chunk files

pub mod block;
pub mod scanner;

// Re-export main types
pub use block::{frame_name, Block, HeaderLine};
pub use scanner::{scan_chunks, scan_str, LineEvent, ScanState, TraceScan, TraceScanner};
