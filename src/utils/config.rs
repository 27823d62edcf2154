//! Configuration and constants for the CLI.

use crate::utils::error::ConfigError;
use std::path::{Path, PathBuf};

/// Default chunk size in bytes (250 KiB)
pub const DEFAULT_CHUNK_SIZE: u64 = 250 * 1024;

/// Environment variable naming the goroutine dump to analyze
pub const FILE_ENV_VAR: &str = "FILE";

/// Environment variable overriding the chunk size
pub const CHUNK_SIZE_ENV_VAR: &str = "CHUNK_SIZE";

/// Extension stripped from the source name and appended to every chunk
pub const CHUNK_EXTENSION: &str = ".txt";

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Markers recognised on goroutine header lines
pub const HEADER_MARKER: &str = "goroutine";
pub const HEADER_DELIMITER: &str = ":";

// Instruction-pointer prefix stripped from call sites
pub const ADDRESS_MARKER: &str = "0x";

/// Resolved source dump
///
/// **Public** - built once at startup and shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Path to the goroutine dump
    pub path: PathBuf,

    /// Size of the dump in bytes at startup
    pub len: u64,
}

impl SourceConfig {
    /// Resolve the source from the raw `FILE` value
    ///
    /// # Errors
    /// * `ConfigError::MissingSource` - value absent or whitespace-only
    /// * `ConfigError::SourceUnreadable` - the file cannot be stat'd
    pub fn from_raw(raw: Option<&str>) -> Result<Self, ConfigError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingSource);
        }

        Self::from_path(trimmed)
    }

    /// Stat `path` and capture its length
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| ConfigError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            len: metadata.len(),
        })
    }
}

/// Reject a zero chunk size
pub fn validate_chunk_size(chunk_size: u64) -> Result<u64, ConfigError> {
    if chunk_size == 0 {
        return Err(ConfigError::InvalidChunkSize);
    }
    Ok(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_source() {
        assert!(matches!(
            SourceConfig::from_raw(None),
            Err(ConfigError::MissingSource)
        ));
    }

    #[test]
    fn test_blank_source() {
        assert!(matches!(
            SourceConfig::from_raw(Some("   \t")),
            Err(ConfigError::MissingSource)
        ));
    }

    #[test]
    fn test_unreadable_source() {
        let result = SourceConfig::from_raw(Some("/definitely/not/here/dump.txt"));
        assert!(matches!(result, Err(ConfigError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_source_is_trimmed_and_stated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"goroutine 1 [running]:\n").unwrap();
        let raw = format!("  {}  ", file.path().display());

        let source = SourceConfig::from_raw(Some(&raw)).unwrap();

        assert_eq!(source.path, file.path());
        assert_eq!(source.len, 23);
    }

    #[test]
    fn test_validate_chunk_size() {
        assert!(validate_chunk_size(0).is_err());
        assert_eq!(validate_chunk_size(DEFAULT_CHUNK_SIZE).unwrap(), 256_000);
    }
}
