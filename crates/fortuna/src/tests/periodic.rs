// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::consts::SEED_FILE_SIZE;
use crate::fortuna::Fortuna;
use crate::periodic::PeriodicSeedWriter;
use crate::seed_file::SeedFile;

fn seeded() -> Arc<Fortuna> {
    let fortuna = Fortuna::new().expect("Failed to create fortuna");
    fortuna.seed(99).expect("Failed to seed");
    Arc::new(fortuna)
}

#[test]
fn test_writes_on_schedule() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");
    let seed_file = SeedFile::new(seeded(), &path);

    let writer = PeriodicSeedWriter::spawn(seed_file, Duration::from_millis(10));

    let deadline = Instant::now() + Duration::from_secs(5);
    while !path.exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    writer.stop();

    assert_eq!(
        fs::read(&path).expect("Seed file never written").len(),
        SEED_FILE_SIZE
    );
}

#[test]
fn test_stop_before_first_tick() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");
    let seed_file = SeedFile::new(seeded(), &path);

    let writer = PeriodicSeedWriter::spawn(seed_file, Duration::from_secs(3600));
    let start = Instant::now();
    writer.stop();

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(!path.exists());
}

#[test]
fn test_drop_stops_writer() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");

    {
        let _writer =
            PeriodicSeedWriter::spawn(SeedFile::new(seeded(), &path), Duration::from_secs(3600));
    }

    assert!(!path.exists());
}

#[test]
fn test_write_failures_keep_running() {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let path = dir.path().join("seed.dat");
    let unseeded = Arc::new(Fortuna::new().expect("Failed to create fortuna"));

    let writer =
        PeriodicSeedWriter::spawn(SeedFile::new(Arc::clone(&unseeded), &path), Duration::from_millis(5));
    thread::sleep(Duration::from_millis(30));

    unseeded.seed(1).expect("Failed to seed");

    let deadline = Instant::now() + Duration::from_secs(5);
    while !path.exists() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    writer.stop();

    assert!(path.exists());
}
