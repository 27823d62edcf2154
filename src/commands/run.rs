//! Run command: split, report, then clean in one invocation.

use super::clean::execute_clean;
use super::report::{execute_report, ReportArgs};
use super::split::execute_split;
use crate::aggregator::TraceStats;
use crate::utils::config::SourceConfig;
use anyhow::Result;
use log::info;
use std::io::Write;

/// Execute split, report and clean
///
/// Chunks are left on disk when the report fails or `keep_chunks` is set.
pub fn execute_run<W: Write>(
    source: &SourceConfig,
    args: &ReportArgs,
    keep_chunks: bool,
    out: &mut W,
) -> Result<TraceStats> {
    execute_split(source, args.chunk_size)?;
    let stats = execute_report(source, args, out)?;

    if keep_chunks {
        info!("Keeping chunk files");
    } else {
        execute_clean(source, args.chunk_size)?;
    }

    Ok(stats)
}
