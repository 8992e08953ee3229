//! Set-associative cache simulator CLI.
//!
//! This binary provides a single entry point for both halves of the tool:
//! 1. **Run:** Derive the cache geometry from configuration, replay a trace
//!    file (or generate a synthetic one in memory), and report hit/miss
//!    statistics.
//! 2. **Gen:** Materialize a synthetic trace file for later replay.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::Config;
use cachesim_core::sim::Simulation;
use cachesim_core::trace::{self, TraceGenerator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Set-associative cache simulator with LRU replacement",
    long_about = "Simulate a memory-access trace against a configurable set-associative cache.\n\nConfiguration files use KEY: value lines (CACHE_SIZE_KB, BLOCK_SIZE_BYTES, ASSOCIATIVITY, TRACE_LENGTH, TRACE_SEED) or JSON.\n\nExamples:\n  cachesim run -c config.ini\n  cachesim run -c config.ini -t trace.txt\n  cachesim gen -o trace.txt --seed 42"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace against the configured cache.
    Run {
        /// Configuration file (KEY: value or .json); defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trace file to replay; a synthetic trace is generated when omitted.
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Seed override for the synthetic trace.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a synthetic trace file.
    Gen {
        /// Configuration file supplying trace parameters.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output trace file.
        #[arg(short, long, default_value = "trace.txt")]
        output: PathBuf,

        /// Seed override; a time-based seed is used when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Number of accesses to generate.
        #[arg(long)]
        length: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            config,
            trace,
            seed,
        }) => cmd_run(config, trace, seed),
        Some(Commands::Gen {
            config,
            output,
            seed,
            length,
        }) => cmd_gen(config, &output, seed, length),
        None => {
            eprintln!("cachesim — pass a subcommand");
            eprintln!();
            eprintln!("  cachesim run -c <config>             Simulate a fresh synthetic trace");
            eprintln!("  cachesim run -c <config> -t <trace>  Replay an existing trace file");
            eprintln!("  cachesim gen -o <trace>              Generate a trace file");
            eprintln!();
            eprintln!("  cachesim --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the configuration file, or defaults when none was given.
///
/// Exits with status 1 when the file cannot be read or parsed.
fn load_config(path: Option<PathBuf>) -> Config {
    match path {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            eprintln!("Error reading config {}: {e}", path.display());
            process::exit(1);
        }),
        None => Config::default(),
    }
}

/// Runs the simulation: derives geometry, obtains a trace, replays it, and
/// prints the results banner. Exits with status 1 on invalid geometry or an
/// unreadable trace file.
fn cmd_run(config: Option<PathBuf>, trace_path: Option<PathBuf>, seed: Option<u64>) {
    let mut config = load_config(config);
    if let Some(seed) = seed {
        config.trace.seed = Some(seed);
    }

    println!("Configuration:");
    println!("  cache_size     {} KB", config.cache.cache_size_kb);
    println!("  block_size     {} B", config.cache.block_size_bytes);
    println!("  associativity  {}", config.cache.associativity);

    let mut sim = match Simulation::new(&config.cache) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("\n[!] Invalid geometry: {e}");
            process::exit(1);
        }
    };

    let geometry = *sim.geometry();
    println!();
    println!("Cache geometry:");
    println!("  num_sets       {}", geometry.num_sets);
    println!("  offset_bits    {}", geometry.offset_bits);
    println!("  index_bits     {}", geometry.index_bits);
    println!("  tag_bits       {}", geometry.tag_bits);

    let records = match trace_path {
        Some(path) => {
            println!("\n[*] Replaying trace: {}", path.display());
            trace::read_trace(&path).unwrap_or_else(|e| {
                eprintln!("Error reading trace {}: {e}", path.display());
                process::exit(1);
            })
        }
        None => {
            println!("\n[*] Generating synthetic trace ({} accesses)", config.trace.length);
            TraceGenerator::new(&config.trace).generate()
        }
    };

    sim.run(records);
    sim.stats().print();
}

/// Generates a trace file. Exits with status 1 when the file cannot be written.
fn cmd_gen(config: Option<PathBuf>, output: &Path, seed: Option<u64>, length: Option<usize>) {
    let mut config = load_config(config);
    if let Some(seed) = seed {
        config.trace.seed = Some(seed);
    }
    if let Some(length) = length {
        config.trace.length = length;
    }

    let records = TraceGenerator::new(&config.trace).generate();
    if let Err(e) = trace::write_trace(output, &records) {
        eprintln!("Error writing trace {}: {e}", output.display());
        process::exit(1);
    }
    println!("[*] Wrote {} accesses to {}", records.len(), output.display());
}
