// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs;
use std::path::Path;

use clap::Parser;

use fortuna::consts::SEED_FILE_SIZE;

use crate::{Cli, run};

/// Parses a command line with a seed file at `seed_file` and an entropy
/// producer that stays asleep for the duration of the test.
fn cli(seed_file: &Path, command: &[&str]) -> Cli {
    let mut args = vec![
        "fortunactl".to_owned(),
        "--seed-file".to_owned(),
        seed_file.display().to_string(),
        "--entropy-interval-ms".to_owned(),
        "3600000".to_owned(),
    ];
    args.extend(command.iter().map(|arg| (*arg).to_owned()));

    Cli::try_parse_from(args).expect("Failed to parse arguments")
}

#[test]
fn test_run_with_unwritable_seed_file_succeeds() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("missing").join("seed.dat");

    let result = run(cli(&path, &["numbers", "--min", "1", "--max", "7", "--count", "3"]));

    assert!(result.is_ok(), "unexpected failure: {:?}", result.err());
    assert!(!path.exists());
}

#[test]
fn test_run_rewrites_seed_file_on_exit() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");
    let stored = [0x77u8; SEED_FILE_SIZE];
    fs::write(&path, stored).expect("Failed to write seed file");

    run(cli(&path, &["sequence", "--min", "-5", "--max", "5", "--count", "10"]))
        .expect("Failed to run");

    let rewritten = fs::read(&path).expect("Failed to read seed file");
    assert_eq!(rewritten.len(), SEED_FILE_SIZE);
    assert_ne!(rewritten, stored);
}

#[test]
fn test_run_invalid_count_is_client_error() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");

    let err = run(cli(&path, &["sequence", "--min", "0", "--max", "3", "--count", "4"]))
        .expect_err("Expected invalid count");

    assert!(err.is_client_error());
    // The seed file is still refreshed after a failed command.
    assert_eq!(
        fs::read(&path).expect("Seed file not written").len(),
        SEED_FILE_SIZE
    );
}

#[test]
fn test_run_invalid_pool_count() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");

    let err = run(cli(&path, &["--pools", "0", "numbers", "--min", "0", "--max", "2"]))
        .expect_err("Expected invalid configuration");

    assert!(!err.is_fatal());
    assert!(!err.is_client_error());
}

#[test]
fn test_run_dump_writes_requested_bytes() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");
    let out = dir.path().join("out.bin");
    let out_arg = out.display().to_string();

    run(cli(&path, &["dump", "--bytes", "100000", "--out", &out_arg])).expect("Failed to run");

    let dumped = fs::read(&out).expect("Failed to read dump");
    assert_eq!(dumped.len(), 100_000);
    assert!(dumped.iter().any(|byte| *byte != 0));
}

#[test]
fn test_parse_defaults() {
    let cli = Cli::try_parse_from(["fortunactl", "dump"]).expect("Failed to parse arguments");

    assert_eq!(cli.pools, 32);
    assert_eq!(cli.seed_interval_secs, 60);
    assert!(matches!(
        cli.command,
        crate::Commands::Dump(crate::DumpArgs { bytes, out: None }) if bytes == 1 << 25
    ));
}
