// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Little-endian block counter fed to the generator's block cipher.

use zeroize::Zeroize;

use crate::error::FortunaError;

const BYTE_SIZE: usize = 8;

/// Fixed-width little-endian counter.
///
/// The width is chosen at construction (one cipher block for the generator)
/// and never changes. An all-zero counter marks a generator that was never
/// seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    bytes: Vec<u8>,
}

impl Counter {
    /// Creates a zero counter of `bits / 8` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidCounterSize`] if `bits` is not a multiple of 8.
    pub fn new(bits: usize) -> Result<Self, FortunaError> {
        if bits % BYTE_SIZE != 0 {
            return Err(FortunaError::InvalidCounterSize { bits });
        }

        Ok(Self {
            bytes: vec![0u8; bits / BYTE_SIZE],
        })
    }

    /// Adds one, propagating the carry. Wraps silently on overflow.
    pub fn increment(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte = byte.wrapping_add(1);

            if *byte != 0 {
                break;
            }
        }
    }

    /// Little-endian value of the counter.
    ///
    /// Supports counters up to 128 bits. Wider counters report their low
    /// 128 bits.
    pub fn value(&self) -> u128 {
        self.bytes
            .iter()
            .take(size_of::<u128>())
            .enumerate()
            .fold(0u128, |acc, (i, byte)| acc | (u128::from(*byte) << (BYTE_SIZE * i)))
    }

    /// True only for the all-zero state.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|byte| *byte == 0)
    }

    /// Counter width in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-width counter.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw little-endian bytes, used as a cipher input block.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
