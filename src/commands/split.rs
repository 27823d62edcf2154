//! Split command implementation.

use crate::chunker::{split_file, ChunkPlan};
use crate::utils::config::SourceConfig;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Split the source dump into chunk files
///
/// **Public** - called from main.rs for `goan split`
pub fn execute_split(source: &SourceConfig, chunk_size: u64) -> Result<Vec<PathBuf>> {
    let plan = ChunkPlan::for_source(source, chunk_size)?;

    let written = split_file(&plan)
        .with_context(|| format!("Failed to split {}", source.path.display()))?;

    info!("✓ Split into {} chunks", written.len());
    Ok(written)
}
