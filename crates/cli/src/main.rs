//! Cache simulator CLI.
//!
//! This binary wires the boundary concerns around the core model:
//! 1. **Flags:** Cache geometry (`-s`, `-E`, `-b`) and the trace file (`-t`).
//! 2. **Trace I/O:** Opens and streams the trace through the replayer.
//! 3. **Rendering:** Per-record verbose lines, the final `hits:... misses:...
//!    evictions:...` summary, or a JSON statistics object.
//!
//! Exit code is 0 on success and 1 on any configuration, trace, or I/O
//! failure, with the error printed to stderr.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use csim_core::cache::CacheSim;
use csim_core::config::CacheConfig;
use csim_core::replay::{MalformedPolicy, RecordEvent, Replayer};
use csim_core::trace::TraceReader;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache behavior simulator",
    long_about = "Replay a memory access trace against a modeled LRU cache and report\n\
                  hit, miss, and eviction counts.\n\n\
                  Examples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 8 -E 2 -b 6 -t traces/long.trace"
)]
struct Cli {
    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "s")]
    set_bits: u32,

    /// Associativity: number of lines per set.
    #[arg(short = 'E', value_name = "E")]
    ways: usize,

    /// Number of block offset bits (each block spans 2^b bytes).
    #[arg(short = 'b', value_name = "b")]
    block_bits: u32,

    /// Memory access trace file to replay.
    #[arg(short = 't', long = "trace", value_name = "FILE")]
    trace: PathBuf,

    /// Print one line per processed record.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Skip malformed trace records (and report how many) instead of aborting.
    #[arg(long)]
    lenient: bool,

    /// Print the final statistics as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("csim: {err}");
        process::exit(1);
    }
}

/// Builds the simulator, replays the trace, and renders the report.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CacheConfig::new(cli.set_bits, cli.ways, cli.block_bits);
    let sim = CacheSim::new(&config)?;

    let file = File::open(&cli.trace)
        .map_err(|err| format!("cannot open {}: {err}", cli.trace.display()))?;
    let reader = TraceReader::new(BufReader::new(file));

    let policy = if cli.lenient {
        MalformedPolicy::Lenient
    } else {
        MalformedPolicy::Strict
    };
    let mut replayer = Replayer::with_policy(sim, policy);

    let stats = if cli.verbose {
        replayer.run_with(reader, print_record)?
    } else {
        replayer.run(reader)?
    };

    if replayer.skipped() > 0 {
        eprintln!("csim: skipped {} malformed record(s)", replayer.skipped());
    }

    if cli.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        println!(
            "hits:{} misses:{} evictions:{}",
            stats.hits, stats.misses, stats.evictions
        );
    }
    Ok(())
}

/// Renders one verbose line: `op addr,size outcome`, with the guaranteed
/// second hit of a modify appended.
fn print_record(event: &RecordEvent<'_>) {
    let record = event.record;
    match event.second {
        Some(second) => println!(
            "{} {:x},{} {} {}",
            record.op.code(),
            record.addr,
            record.size,
            event.first,
            second
        ),
        None => println!(
            "{} {:x},{} {}",
            record.op.code(),
            record.addr,
            record.size,
            event.first
        ),
    }
}
