//! Cache simulator CLI.
//!
//! This binary replays a Valgrind memory trace against a set-associative cache. It performs:
//! 1. **Configuration:** Builds the cache from `-s/-E/-b` flags, optionally layered over a JSON file.
//! 2. **Replay:** Runs the trace, optionally echoing each access's outcome (`-v`).
//! 3. **Reporting:** Prints the summary line, a JSON object, or the full banner report.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::ReplacementPolicy;
use cachesim_core::{CacheConfig, CacheStats, SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a Valgrind lackey trace against a cache with 2^s sets of E lines and 2^b-byte blocks.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 0 -E 2 -b 4 -t traces/mixed.trace\n  csim -c cache.json -t traces/yi.trace --json"
)]
struct Cli {
    /// Number of set-index bits (2^s sets).
    #[arg(short = 's', long = "set-bits")]
    set_bits: Option<u32>,

    /// Associativity (lines per set).
    #[arg(short = 'E', long = "lines")]
    lines_per_set: Option<usize>,

    /// Number of block-offset bits (2^b-byte blocks).
    #[arg(short = 'b', long = "block-bits")]
    block_bits: Option<u32>,

    /// Valgrind trace to replay.
    #[arg(short = 't', long = "trace")]
    trace: PathBuf,

    /// Echo every access with its outcome.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Replacement policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// JSON cache configuration; flags override its fields.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print the counters as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Print the full statistics report after the summary.
    #[arg(long, conflicts_with = "json")]
    report: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Lru,
    Fifo,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Lru => Self::Lru,
            PolicyArg::Fifo => Self::Fifo,
        }
    }
}

impl Cli {
    /// Resolves the cache configuration: JSON file (or defaults), then flags.
    fn cache_config(&self) -> Result<CacheConfig, SimError> {
        let mut config = match &self.config {
            Some(path) => CacheConfig::from_file(path)?,
            None => CacheConfig::default(),
        };
        if let Some(s) = self.set_bits {
            config.set_bits = s;
        }
        if let Some(e) = self.lines_per_set {
            config.lines_per_set = e;
        }
        if let Some(b) = self.block_bits {
            config.block_bits = b;
        }
        if let Some(policy) = self.policy {
            config.policy = policy.into();
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(&cli) {
        error!(error = %e, "simulation aborted");
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Builds the simulator, replays the trace and prints the results.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = cli.cache_config()?;
    let mut sim = Simulator::new(&config)?;

    let file = File::open(&cli.trace)?;
    let reader = BufReader::new(file);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = if cli.verbose {
        sim.run_verbose(reader, &mut out)?
    } else {
        sim.run(reader)?
    };

    print_stats(cli, &stats, &mut out)?;
    out.flush()?;
    Ok(())
}

fn print_stats<W: Write>(cli: &Cli, stats: &CacheStats, out: &mut W) -> Result<(), SimError> {
    if cli.json {
        serde_json::to_writer(&mut *out, stats).map_err(io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "{stats}")?;
    if cli.report {
        stats.write_report(out)?;
    }
    Ok(())
}
