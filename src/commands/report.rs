//! Report command implementation.
//!
//! The report command:
//! 1. Scans every chunk file in order
//! 2. Aggregates state and call-site tables
//! 3. Writes the aligned text report
//! 4. Optionally writes a JSON report and an SVG flamegraph

use crate::aggregator::TraceStats;
use crate::chunker::ChunkPlan;
use crate::flamegraph::{generate_flamegraph, FlamegraphConfig};
use crate::output::{render_report, write_report, write_svg, Report, ReportMeta};
use crate::parser::scan_chunks;
use crate::utils::config::{SourceConfig, DEFAULT_CHUNK_SIZE};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Chunk size the dump was split with
    pub chunk_size: u64,

    /// Output path for a JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for an SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_json: None,
            output_svg: None,
            flamegraph_config: None,
        }
    }
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * The chunk size is 0
/// * A chunk file is missing or unreadable
/// * The text report cannot be written to `out`
/// * JSON or SVG output fails
pub fn execute_report<W: Write>(
    source: &SourceConfig,
    args: &ReportArgs,
    out: &mut W,
) -> Result<TraceStats> {
    let start_time = Instant::now();
    let plan = ChunkPlan::for_source(source, args.chunk_size)?;

    info!(
        "Scanning {} chunks of {}",
        plan.written_parts(),
        source.path.display()
    );
    let scan = scan_chunks(&plan).context("Failed to scan chunk files")?;

    let stats = TraceStats::from_scan(&scan);
    info!("{}", stats.summary());

    out.write_all(render_report(&stats).as_bytes())
        .context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    if let Some(json_path) = &args.output_json {
        let meta = ReportMeta {
            source: source.path.display().to_string(),
            chunk_size: args.chunk_size,
            chunks: plan.written_parts(),
            skipped_headers: scan.skipped_headers,
        };
        write_report(&Report::new(&stats, meta), json_path)
            .context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", json_path.display());
    }

    if let Some(svg_path) = &args.output_svg {
        let svg = generate_flamegraph(&stats.call_sites, args.flamegraph_config.as_ref())
            .context("Failed to generate flamegraph")?;
        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    debug!(
        "Report completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(stats)
}
