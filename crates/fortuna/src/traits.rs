// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::Arc;

use crate::error::{EntropyError, FortunaError};

/// Byte stream and integer draws from a seeded CSPRNG.
pub trait Prng {
    /// Fills `dest` with random bytes and returns the number written.
    ///
    /// # Errors
    ///
    /// Fails until the generator has been seeded at least once.
    fn read(&self, dest: &mut [u8]) -> Result<usize, FortunaError>;

    /// Draws a non-negative 63-bit integer.
    ///
    /// # Errors
    ///
    /// Fails until the generator has been seeded at least once.
    fn int63(&self) -> Result<i64, FortunaError>;
}

/// Receiver of entropy events (9.5.1).
pub trait Accumulator {
    /// Adds `event` from source `source_id` to pool `pool_id`.
    ///
    /// # Errors
    ///
    /// Rejects unknown pools and events longer than 255 bytes.
    fn add_random_event(
        &self,
        source_id: u8,
        pool_id: usize,
        event: &[u8],
    ) -> Result<(), FortunaError>;
}

/// Producer of entropy samples (9.5.1).
pub trait EntropySource {
    /// Blocks until the next sample is available.
    ///
    /// # Errors
    ///
    /// An error ends the producer that owns this source.
    fn entropy(&mut self) -> Result<Vec<u8>, EntropyError>;
}

impl<T: Prng + ?Sized> Prng for &T {
    fn read(&self, dest: &mut [u8]) -> Result<usize, FortunaError> {
        (**self).read(dest)
    }

    fn int63(&self) -> Result<i64, FortunaError> {
        (**self).int63()
    }
}

impl<T: Prng + ?Sized> Prng for Arc<T> {
    fn read(&self, dest: &mut [u8]) -> Result<usize, FortunaError> {
        (**self).read(dest)
    }

    fn int63(&self) -> Result<i64, FortunaError> {
        (**self).int63()
    }
}

impl<T: Accumulator + ?Sized> Accumulator for Arc<T> {
    fn add_random_event(
        &self,
        source_id: u8,
        pool_id: usize,
        event: &[u8],
    ) -> Result<(), FortunaError> {
        (**self).add_random_event(source_id, pool_id, event)
    }
}
