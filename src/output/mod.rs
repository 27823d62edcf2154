//! Report writers.
//!
//! This module handles:
//! - The aligned text report printed to stdout
//! - JSON reports
//! - SVG flamegraph files

pub mod json;
pub mod schema;
pub mod svg;
pub mod table;

// Re-export main functions
pub use json::{read_report, write_report};
pub use schema::{Report, ReportMeta};
pub use svg::write_svg;
pub use table::{render_report, AlignedTable};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate that an output path is writable
///
/// Rejects empty paths and existing directories.
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
