// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Uniform integer draws on top of a [`Prng`].

use std::collections::HashSet;

use crate::error::OracleError;
use crate::traits::Prng;

/// Draws integers in `[min, max)` from a PRNG.
#[derive(Debug)]
pub struct Oracle<P> {
    prng: P,
}

impl<P: Prng> Oracle<P> {
    /// Wraps `prng`.
    pub fn new(prng: P) -> Self {
        Self { prng }
    }

    /// `count` independent uniform integers in `[min, max)`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidRange`] unless `min < max`, and
    /// [`OracleError::Prng`] if the PRNG fails.
    pub fn numbers(&self, min: i64, max: i64, count: usize) -> Result<Vec<i64>, OracleError> {
        let span = span(min, max)?;

        (0..count)
            .map(|_| Ok(offset(min, self.below(span)?)))
            .collect()
    }

    /// `count` distinct uniform integers in `[min, max)`.
    ///
    /// Uses Floyd's sampling: exactly `count` bounded draws, so the call
    /// terminates even when `count` equals the size of the range. Floyd picks
    /// a uniform set but emits late collisions in ascending order, so the
    /// result is shuffled before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::InvalidRange`] unless `min < max`,
    /// [`OracleError::InvalidCount`] if `count` exceeds `max - min`, and
    /// [`OracleError::Prng`] if the PRNG fails.
    pub fn sequence(&self, min: i64, max: i64, count: usize) -> Result<Vec<i64>, OracleError> {
        let span = span(min, max)?;

        if count as u64 > span {
            return Err(OracleError::InvalidCount { count, span });
        }

        let mut seen = HashSet::with_capacity(count);
        let mut result = Vec::with_capacity(count);

        for j in (span - count as u64)..span {
            let t = self.below(j + 1)?;
            let pick = if seen.insert(t) {
                t
            } else {
                seen.insert(j);
                j
            };

            result.push(offset(min, pick));
        }

        // Fisher-Yates
        for i in (1..result.len()).rev() {
            let k = self.below(i as u64 + 1)? as usize;
            result.swap(i, k);
        }

        Ok(result)
    }

    /// Uniform value in `[0, bound)` by rejection sampling on 64-bit output.
    fn below(&self, bound: u64) -> Result<u64, OracleError> {
        // Largest multiple of `bound` that fits; values past it are biased.
        let zone = u64::MAX - (u64::MAX % bound);

        loop {
            let mut bytes = [0u8; 8];
            self.prng.read(&mut bytes)?;

            let value = u64::from_le_bytes(bytes);
            if value < zone {
                return Ok(value % bound);
            }
        }
    }
}

fn span(min: i64, max: i64) -> Result<u64, OracleError> {
    if max <= min {
        return Err(OracleError::InvalidRange { min, max });
    }

    Ok(max.wrapping_sub(min) as u64)
}

fn offset(min: i64, value: u64) -> i64 {
    min.wrapping_add(value as i64)
}
