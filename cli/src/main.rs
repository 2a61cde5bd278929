//! neuronet: load a directed edge list into a CSR graph and query it.
//!
//! # Commands
//!
//! - `neuronet stats <FILE>` - node/edge counts, skipped records, memory, load time
//! - `neuronet max-degree <FILE>` - node with the largest out-degree
//! - `neuronet degree <FILE> --top N` - nodes ranked by out-degree
//! - `neuronet bfs <FILE> --start S --depth D` - edges within D hops of S
//! - `neuronet neighbors <FILE> <NODE>` - sorted out-neighbors
//! - `neuronet shell [FILE]` - load once, query many times from stdin
//!
//! # Examples
//!
//! ```bash
//! neuronet bfs web-Google.txt --start 0 --depth 3
//! neuronet --format json max-degree web-Google.txt
//! RUST_LOG=debug neuronet shell web-Google.txt
//! ```

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod degree;
mod error;
mod load;
mod neighborhood;
mod render;
mod shell;
mod state;
mod status;
mod util;

use config::{OutputFormat, Settings, DEFAULT_BFS_DEPTH, DEFAULT_DEGREE_TOP, DEFAULT_MAX_MEMORY_MB};
use degree::{DegreeRankingReport, MaxDegreeReport};
use error::CliResult;
use neighborhood::{BfsReport, NeighborsReport};
use status::StatsReport;

/// Edge-list graph analysis over a compressed sparse row engine
#[derive(Parser)]
#[command(name = "neuronet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Reject graphs whose CSR arrays exceed this many megabytes
    #[arg(long, global = true, env = "NEURONET_MAX_MEMORY_MB", default_value_t = DEFAULT_MAX_MEMORY_MB)]
    max_memory_mb: usize,

    /// Output format
    #[arg(long, global = true, value_enum, env = "NEURONET_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an edge list and report its size
    Stats {
        /// Edge-list file: one `source destination` pair per line
        file: PathBuf,
    },

    /// Find the node with the largest out-degree
    MaxDegree {
        /// Edge-list file
        file: PathBuf,
    },

    /// Rank nodes by out-degree
    Degree {
        /// Edge-list file
        file: PathBuf,

        /// Number of nodes to list (0 = all)
        #[arg(short = 'n', long, default_value_t = DEFAULT_DEGREE_TOP)]
        top: usize,
    },

    /// List the edges explored by a depth-bounded BFS
    Bfs {
        /// Edge-list file
        file: PathBuf,

        /// Start node (out-of-range ids give an empty result)
        #[arg(short, long, allow_negative_numbers = true)]
        start: i64,

        /// Maximum hop count
        #[arg(short, long, default_value_t = DEFAULT_BFS_DEPTH, allow_negative_numbers = true)]
        depth: i64,
    },

    /// List the sorted out-neighbors of a node
    Neighbors {
        /// Edge-list file
        file: PathBuf,

        /// Node id
        #[arg(allow_negative_numbers = true)]
        node: i64,
    },

    /// Interactive session reading commands from stdin
    Shell {
        /// Edge-list file to load before the first command
        file: Option<PathBuf>,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run<W: Write>(command: Commands, settings: &Settings, out: &mut W) -> CliResult<()> {
    let format = settings.format;
    match command {
        Commands::Stats { file } => {
            let gs = load::load_graph(&file, settings)?;
            render::emit(out, format, &StatsReport::from_state(&gs))
        }
        Commands::MaxDegree { file } => {
            let gs = load::load_graph(&file, settings)?;
            render::emit(out, format, &MaxDegreeReport::compute(&gs.graph))
        }
        Commands::Degree { file, top } => {
            let gs = load::load_graph(&file, settings)?;
            render::emit(out, format, &DegreeRankingReport::compute(&gs.graph, top))
        }
        Commands::Bfs { file, start, depth } => {
            let gs = load::load_graph(&file, settings)?;
            render::emit(out, format, &BfsReport::compute(&gs.graph, start, depth))
        }
        Commands::Neighbors { file, node } => {
            let gs = load::load_graph(&file, settings)?;
            render::emit(out, format, &NeighborsReport::compute(&gs.graph, node))
        }
        Commands::Shell { file } => {
            let stdin = std::io::stdin();
            let prompt = stdin.is_terminal();
            shell::run(stdin.lock(), out, settings, file.as_deref(), prompt)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let settings = Settings {
        max_memory_mb: cli.max_memory_mb,
        format: cli.format,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run(cli.command, &settings, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
