//! Write and remove chunk files.

use super::naming::ChunkPlan;
use crate::utils::error::ChunkError;
use log::{debug, info};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Split the source into chunk files
///
/// **Public** - write phase of the chunker
///
/// Reads up to `chunk_size` bytes per chunk, continuing from the previous
/// offset, and stops early once a read returns nothing. Existing chunk
/// files are replaced.
///
/// # Returns
/// Paths written, in index order
///
/// # Errors
/// * `ChunkError::ReadFailed` - the source cannot be opened or read
/// * `ChunkError::WriteFailed` - a chunk cannot be written
pub fn split_file(plan: &ChunkPlan) -> Result<Vec<PathBuf>, ChunkError> {
    let read_failed = |source| ChunkError::ReadFailed {
        path: plan.source.clone(),
        source,
    };

    info!(
        "Splitting {} ({} bytes) into at most {} chunks of {} bytes",
        plan.source.display(),
        plan.source_len,
        plan.parts(),
        plan.chunk_size()
    );

    let mut file = File::open(&plan.source).map_err(read_failed)?;
    let mut buf = Vec::with_capacity(plan.chunk_size().min(plan.source_len) as usize);
    let mut written = Vec::new();

    for index in 1..=plan.parts() {
        buf.clear();
        let n = (&mut file)
            .take(plan.chunk_size())
            .read_to_end(&mut buf)
            .map_err(read_failed)?;
        if n == 0 {
            debug!("End of input reached before chunk {}", index);
            break;
        }

        let path = plan.chunk_path(index);
        remove_if_present(&path);
        std::fs::write(&path, &buf).map_err(|source| ChunkError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} ({} bytes)", path.display(), n);
        written.push(path);
    }

    info!("Wrote {} chunk files", written.len());
    Ok(written)
}

/// Delete every chunk file the splitter writes for this plan
///
/// **Public** - cleanup phase of the chunker
///
/// # Errors
/// * `ChunkError::RemoveFailed` - a chunk is missing or cannot be removed
pub fn clean_chunks(plan: &ChunkPlan) -> Result<usize, ChunkError> {
    // Skips the trailing index an exact-multiple source never gets, so
    // only files within the written range are fatal when missing.
    let paths = plan.chunk_paths();

    for path in &paths {
        std::fs::remove_file(path).map_err(|source| ChunkError::RemoveFailed {
            path: path.clone(),
            source,
        })?;
        debug!("Removed {}", path.display());
    }

    info!("Removed {} chunk files", paths.len());
    Ok(paths.len())
}

// Stale chunks are replaced silently; a missing file is fine.
fn remove_if_present(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Replacing existing chunk {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove {}: {}", path.display(), e),
    }
}
