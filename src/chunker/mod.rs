//! Fixed-size chunking of a goroutine dump.
//!
//! The splitter knows nothing about the dump format: it cuts the source
//! into byte ranges of equal size and writes each to its own file. The
//! scanner is responsible for tolerating the resulting boundary splits.

pub mod naming;
pub mod splitter;

// Re-export main types and functions
pub use naming::{chunk_path, ChunkPlan};
pub use splitter::{clean_chunks, split_file};
