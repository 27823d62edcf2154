//! Chunk count and chunk file naming.
//!
//! Chunks live next to the source: `dump.txt` becomes `dump_1.txt`,
//! `dump_2.txt`, ... The `.txt` suffix is only stripped when present.

use crate::utils::config::{validate_chunk_size, SourceConfig, CHUNK_EXTENSION};
use crate::utils::error::ConfigError;
use std::path::{Path, PathBuf};

/// How a source is cut into chunks
///
/// **Public** - shared by the splitter, the cleaner and the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Source dump
    pub source: PathBuf,

    /// Source size in bytes
    pub source_len: u64,

    // Never zero; checked in `new`
    chunk_size: u64,
}

impl ChunkPlan {
    /// Create a plan
    ///
    /// # Errors
    /// * `ConfigError::InvalidChunkSize` - `chunk_size` is 0
    pub fn new(
        source: impl Into<PathBuf>,
        source_len: u64,
        chunk_size: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            source: source.into(),
            source_len,
            chunk_size: validate_chunk_size(chunk_size)?,
        })
    }

    /// Plan for a resolved source
    pub fn for_source(source: &SourceConfig, chunk_size: u64) -> Result<Self, ConfigError> {
        Self::new(source.path.clone(), source.len, chunk_size)
    }

    /// Maximum bytes per chunk
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Upper bound on chunk files: `floor(len / size) + 1`
    pub fn parts(&self) -> u64 {
        self.source_len / self.chunk_size + 1
    }

    /// Chunk files the splitter actually writes
    ///
    /// When the source length is an exact multiple of the chunk size the
    /// final read hits end-of-input and no file is written for it.
    pub fn written_parts(&self) -> u64 {
        if self.source_len % self.chunk_size == 0 {
            self.parts() - 1
        } else {
            self.parts()
        }
    }

    /// Path of the 1-based chunk `index`
    pub fn chunk_path(&self, index: u64) -> PathBuf {
        chunk_path(&self.source, index)
    }

    /// Paths of every written chunk in index order
    pub fn chunk_paths(&self) -> Vec<PathBuf> {
        (1..=self.written_parts())
            .map(|index| self.chunk_path(index))
            .collect()
    }
}

/// Build `<source without ".txt">_<index>.txt`
pub fn chunk_path(source: &Path, index: u64) -> PathBuf {
    let source = source.to_string_lossy();
    let base = source.strip_suffix(CHUNK_EXTENSION).unwrap_or(&source);
    PathBuf::from(format!("{}_{}{}", base, index, CHUNK_EXTENSION))
}
