// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! `fortunactl`: command-line front end for the Fortuna CSPRNG.
//!
//! ```bash
//! # Ten dice rolls
//! fortunactl numbers --min 1 --max 7 --count 10
//!
//! # Lottery draw: six distinct values out of 49
//! fortunactl sequence --min 1 --max 50 --count 6
//!
//! # 32 MiB of raw output for statistical test suites
//! fortunactl dump --out fortuna.bin
//! ```
//!
//! Every run seeds from the seed file (or the clock when it is unusable),
//! keeps a system entropy producer and the periodic seed writer running
//! while the command executes, and rewrites the seed file on exit.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{self, ExitCode};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fortuna::consts::{NUM_POOLS, SEED_FILE_SIZE};
use fortuna::{
    Fortuna, FortunaConfig, FortunaError, Manager, Oracle, OracleError, PeriodicSeedWriter, Prng,
    SeedFile, SystemEntropySource,
};

#[cfg(test)]
mod tests;

/// Fortuna CSPRNG command-line tool
#[derive(Parser)]
#[command(name = "fortunactl")]
#[command(version)]
#[command(about = "Draw random numbers and raw output from a Fortuna CSPRNG", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Seed file read at startup and refreshed while running
    #[arg(long, global = true, env = "FORTUNA_SEED_FILE", default_value = "seed.dat")]
    seed_file: PathBuf,

    /// Number of entropy pools (1..=64)
    #[arg(long, global = true, default_value_t = NUM_POOLS)]
    pools: usize,

    /// Delay between system entropy samples, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    entropy_interval_ms: u64,

    /// Delay between seed file refreshes, in seconds
    #[arg(long, global = true, default_value_t = 60)]
    seed_interval_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uniform integers in [min, max)
    Numbers(RangeArgs),

    /// Distinct uniform integers in [min, max)
    Sequence(RangeArgs),

    /// Stream raw generator output
    Dump(DumpArgs),
}

#[derive(Args)]
struct RangeArgs {
    /// Inclusive lower bound
    #[arg(long, allow_negative_numbers = true)]
    min: i64,

    /// Exclusive upper bound
    #[arg(long, allow_negative_numbers = true)]
    max: i64,

    /// How many values to draw
    #[arg(long, default_value_t = 1)]
    count: usize,
}

#[derive(Args)]
struct DumpArgs {
    /// Bytes to write
    #[arg(long, default_value_t = 1 << 25)]
    bytes: u64,

    /// Output file (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Prng(#[from] FortunaError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    fn is_fatal(&self) -> bool {
        match self {
            Self::Prng(err) | Self::Oracle(OracleError::Prng(err)) => err.is_fatal(),
            _ => false,
        }
    }

    fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Oracle(OracleError::InvalidRange { .. } | OracleError::InvalidCount { .. })
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_fatal() => {
            error!(error = %err, "generator state compromised, aborting");
            process::abort();
        }
        Err(err) if err.is_client_error() => {
            eprintln!("fortunactl: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = FortunaConfig {
        pools: cli.pools,
        ..FortunaConfig::default()
    };
    let fortuna = Arc::new(Fortuna::with_config(config)?);

    seed(&fortuna, &cli.seed_file)?;

    let manager = Manager::new(config.pools)?;
    let source = SystemEntropySource::new(Duration::from_millis(cli.entropy_interval_ms));
    // Producer threads run for the life of the process.
    let _producer = manager.accumulate(Arc::clone(&fortuna), source)?;

    let writer = PeriodicSeedWriter::spawn(
        SeedFile::new(Arc::clone(&fortuna), &cli.seed_file),
        Duration::from_secs(cli.seed_interval_secs),
    );

    let result = match cli.command {
        Commands::Numbers(args) => run_numbers(&fortuna, &args),
        Commands::Sequence(args) => run_sequence(&fortuna, &args),
        Commands::Dump(args) => run_dump(&fortuna, &args),
    };

    writer.stop();
    save_seed(&SeedFile::new(&*fortuna, &cli.seed_file));

    result
}

/// Seeds from the stored seed, falling back to the clock, then replaces the
/// stored seed so it is never reused.
///
/// Seed file failures are logged and never fail the boot.
fn seed(fortuna: &Fortuna, path: &Path) -> Result<(), FortunaError> {
    let seed_file = SeedFile::new(fortuna, path);

    match seed_file.read() {
        Ok(seed) => {
            fortuna.seed_bytes(&seed[..SEED_FILE_SIZE])?;
            info!(path = %path.display(), "seeded from seed file");
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "seed file unusable, seeding from clock");
            fortuna.seed_bytes(&clock_seed())?;
        }
    }

    save_seed(&seed_file);

    Ok(())
}

fn clock_seed() -> [u8; 16] {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_be_bytes()
}

/// Writes a fresh seed, logging failures.
fn save_seed<P: Prng>(seed_file: &SeedFile<P>) {
    if let Err(err) = seed_file.write() {
        warn!(path = %seed_file.path().display(), error = %err, "seed file write failed");
    }
}

fn run_numbers(fortuna: &Fortuna, args: &RangeArgs) -> Result<(), CliError> {
    let numbers = Oracle::new(fortuna).numbers(args.min, args.max, args.count)?;
    print_lines(&numbers)
}

fn run_sequence(fortuna: &Fortuna, args: &RangeArgs) -> Result<(), CliError> {
    let numbers = Oracle::new(fortuna).sequence(args.min, args.max, args.count)?;
    print_lines(&numbers)
}

fn print_lines(numbers: &[i64]) -> Result<(), CliError> {
    let mut out = BufWriter::new(io::stdout().lock());

    for n in numbers {
        writeln!(out, "{n}")?;
    }
    out.flush()?;

    Ok(())
}

fn run_dump(fortuna: &Fortuna, args: &DumpArgs) -> Result<(), CliError> {
    let mut src = fortuna.take(args.bytes);

    let written = match &args.out {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            copy_output(&mut src, &mut out)?
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            copy_output(&mut src, &mut out)?
        }
    };

    debug!(bytes = written, "dump complete");

    Ok(())
}

/// Streams `src` into `out`, surfacing generator failures as such rather than
/// as plain I/O errors.
fn copy_output(src: &mut impl Read, out: &mut impl Write) -> Result<u64, CliError> {
    let written = io::copy(src, out).map_err(|err| {
        let prng = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<FortunaError>())
            .copied();

        match prng {
            Some(prng) => CliError::Prng(prng),
            None => CliError::Io(err),
        }
    })?;
    out.flush()?;

    Ok(written)
}
