//! Clean command implementation.

use crate::chunker::{clean_chunks, ChunkPlan};
use crate::utils::config::SourceConfig;
use anyhow::{Context, Result};
use log::info;

/// Remove the chunk files written by `split`
///
/// **Public** - called from main.rs for `goan clean`
///
/// # Errors
/// Fails on the first chunk that is missing or cannot be removed.
pub fn execute_clean(source: &SourceConfig, chunk_size: u64) -> Result<usize> {
    let plan = ChunkPlan::for_source(source, chunk_size)?;

    let removed = clean_chunks(&plan)
        .with_context(|| format!("Failed to clean chunks of {}", source.path.display()))?;

    info!("✓ Removed {} chunks", removed);
    Ok(removed)
}
