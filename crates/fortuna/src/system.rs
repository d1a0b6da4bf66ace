// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::thread;
use std::time::Duration;

use getrandom::Error as GetRandomError;

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Default pause between two samples.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Default sample size in bytes.
pub const DEFAULT_SAMPLE_SIZE: usize = 32;

/// Entropy source backed by the OS CSPRNG.
///
/// Uses `getrandom`:
/// - Linux/Android: `getrandom()` syscall
/// - macOS/iOS: `getentropy()`
/// - Windows: `BCryptGenRandom`
///
/// Each call sleeps for `interval` before sampling, pacing the producer.
#[derive(Debug, Clone)]
pub struct SystemEntropySource {
    interval: Duration,
    sample_size: usize,
}

impl Default for SystemEntropySource {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl SystemEntropySource {
    /// Creates a source producing 32-byte samples every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Overrides the sample size, capped at 255 bytes.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.min(u8::MAX as usize);
        self
    }

    pub(crate) fn sample_with(
        fill_fn: &dyn Fn(&mut [u8]) -> Result<(), GetRandomError>,
        sample_size: usize,
    ) -> Result<Vec<u8>, EntropyError> {
        let mut sample = vec![0u8; sample_size];
        fill_fn(&mut sample).map_err(|_| EntropyError::EntropyNotAvailable)?;

        Ok(sample)
    }
}

impl EntropySource for SystemEntropySource {
    fn entropy(&mut self) -> Result<Vec<u8>, EntropyError> {
        if !self.interval.is_zero() {
            thread::sleep(self.interval);
        }

        Self::sample_with(&getrandom::fill, self.sample_size)
    }
}
