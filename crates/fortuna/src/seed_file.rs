// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Seed file persistence (Ferguson/Schneier 9.6).
//!
//! The file holds exactly 64 raw bytes of generator output. Writes replace it
//! atomically; reads truncate it before handing out the seed, so a stored seed
//! is consumed at most once.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroizing;

use crate::consts::SEED_FILE_SIZE;
use crate::error::SeedFileError;
use crate::traits::Prng;

/// Seed file bound to a PRNG and a destination path.
#[derive(Debug)]
pub struct SeedFile<P> {
    src: P,
    dest: PathBuf,
}

impl<P: Prng> SeedFile<P> {
    /// Binds `src` to the seed file at `dest`.
    pub fn new(src: P, dest: impl Into<PathBuf>) -> Self {
        Self {
            src,
            dest: dest.into(),
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.dest
    }

    /// Replaces the file with 64 fresh bytes from the PRNG (9.6.1).
    ///
    /// The bytes go to a temporary file in the destination directory which is
    /// then renamed over the destination; readers never observe a partial seed.
    ///
    /// # Errors
    ///
    /// Returns [`SeedFileError::Prng`] if the PRNG is not seeded and
    /// [`SeedFileError::Io`] on any filesystem failure.
    pub fn write(&self) -> Result<(), SeedFileError> {
        let mut seed = Zeroizing::new([0u8; SEED_FILE_SIZE]);
        self.src.read(&mut *seed)?;

        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&*seed)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.dest).map_err(io::Error::from)?;

        debug!(path = %self.dest.display(), "seed file written");

        Ok(())
    }

    /// Reads the stored seed and truncates the file (9.6.2).
    ///
    /// The file is emptied before the seed is returned. If emptying fails the
    /// seed is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SeedFileError::Io`] if the file is missing or cannot be
    /// truncated, and [`SeedFileError::InsufficientSeed`] if it held fewer
    /// than 64 bytes.
    pub fn read(&self) -> Result<Zeroizing<Vec<u8>>, SeedFileError> {
        let seed = Zeroizing::new(fs::read(&self.dest)?);

        File::create(&self.dest)?.sync_all()?;

        debug!(path = %self.dest.display(), len = seed.len(), "seed file consumed");

        if seed.len() < SEED_FILE_SIZE {
            return Err(SeedFileError::InsufficientSeed { len: seed.len() });
        }

        Ok(seed)
    }

    fn dir(&self) -> &Path {
        match self.dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
