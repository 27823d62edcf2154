//! goan
//!
//! Goroutine dump analysis: splits a large stack dump into fixed-size
//! chunks, parses the chunks back into per-goroutine blocks and counts
//! goroutines per blocking state and per leading call site.
//!
//! This crate provides the core implementation for the `goan` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! export FILE=routines-trace.txt
//! goan split && goan > stat.txt && goan clean
//! ```

pub mod aggregator;
pub mod chunker;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
