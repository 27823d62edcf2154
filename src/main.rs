//! goan CLI
//!
//! Splits a goroutine dump into chunks, reports blocking states and call
//! sites across the chunks, and removes the chunks afterwards.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io::{self, Write};
use std::path::PathBuf;

use goan::commands::{execute_clean, execute_report, execute_run, execute_split, ReportArgs};
use goan::flamegraph::FlamegraphConfig;
use goan::utils::config::{
    validate_chunk_size, SourceConfig, CHUNK_SIZE_ENV_VAR, DEFAULT_CHUNK_SIZE, FILE_ENV_VAR,
};

/// goan - goroutine dump analyzer
#[derive(Parser, Debug)]
#[command(name = "goan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute (defaults to `report`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Goroutine dump to analyze
    #[arg(long, global = true, env = FILE_ENV_VAR)]
    file: Option<String>,

    /// Chunk size in bytes
    #[arg(long, global = true, env = CHUNK_SIZE_ENV_VAR, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Also write the report as JSON
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Also write an SVG flamegraph of the call-site table
    #[arg(long, global = true)]
    flamegraph: Option<PathBuf>,

    /// Flamegraph title
    #[arg(long, global = true)]
    title: Option<String>,

    /// Flamegraph width in pixels
    #[arg(long, global = true, default_value = "1200")]
    width: usize,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Split the dump into fixed-size chunk files
    Split,

    /// Delete the chunk files written by `split`
    Clean,

    /// Scan the chunk files and print the report
    Report,

    /// Split, report and clean in one go
    Run {
        /// Leave the chunk files on disk
        #[arg(long)]
        keep_chunks: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let source = SourceConfig::from_raw(cli.file.as_deref())?;
    let chunk_size = validate_chunk_size(cli.chunk_size)?;

    let fg_config = cli.flamegraph.as_ref().map(|_| {
        let config = FlamegraphConfig::new().with_width(cli.width);
        match cli.title.clone() {
            Some(title) => config.with_title(title),
            None => config,
        }
    });

    let report_args = ReportArgs {
        chunk_size,
        output_json: cli.json,
        output_svg: cli.flamegraph,
        flamegraph_config: fg_config,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Split => {
            execute_split(&source, chunk_size)?;
        }

        Commands::Clean => {
            execute_clean(&source, chunk_size)?;
        }

        Commands::Report => {
            execute_report(&source, &report_args, &mut out)?;
        }

        Commands::Run { keep_chunks } => {
            execute_run(&source, &report_args, keep_chunks, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
