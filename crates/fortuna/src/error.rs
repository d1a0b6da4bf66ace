// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Errors raised by the counter, the generator and the accumulator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FortunaError {
    /// Counter width is not a whole number of bytes.
    #[error("invalid counter size: {bits} bits is not a multiple of 8")]
    InvalidCounterSize {
        /// Requested width in bits.
        bits: usize,
    },

    /// The cipher factory rejected a key.
    #[error("block cipher rejected the generator key")]
    CipherInit,

    /// The generator has never been reseeded.
    #[error("attempted to read from an unseeded generator")]
    NotSeeded,

    /// The accumulator has never completed a reseed.
    #[error("fortuna not initialized")]
    NotInitialized,

    /// Pool index outside of the pool bank.
    #[error("pool {pool_id} out of range (pools: {pools})")]
    InvalidPool {
        /// Requested pool.
        pool_id: usize,
        /// Number of pools in the bank.
        pools: usize,
    },

    /// Event longer than 255 bytes.
    #[error("entropy event of {len} bytes exceeds 255 bytes")]
    EventTooLarge {
        /// Length of the rejected event.
        len: usize,
    },

    /// Configuration rejected by [`FortunaConfig::validate`](crate::FortunaConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A mutex was poisoned.
    #[error("mutex poisoned")]
    MutexPoisoned,
}

impl FortunaError {
    /// Returns `true` when the generator state machine can no longer be trusted.
    ///
    /// The library never aborts on its own; callers decide whether a fatal
    /// error terminates the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CipherInit | Self::MutexPoisoned)
    }
}

/// Errors that can occur when collecting entropy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// System entropy source is unavailable or failed to generate random data.
    #[error("EntropyNotAvailable")]
    EntropyNotAvailable,

    /// The source has no more samples to offer.
    #[error("entropy source exhausted")]
    Exhausted,
}

/// Errors from seed file persistence. None of them are fatal.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// Filesystem failure.
    #[error("seed file I/O: {0}")]
    Io(#[from] std::io::Error),

    /// Stored seed is shorter than 64 bytes.
    #[error("failed to read 64 bytes from seed file (found {len})")]
    InsufficientSeed {
        /// Bytes that were present.
        len: usize,
    },

    /// The PRNG could not produce a seed.
    #[error("prng: {0}")]
    Prng(#[from] FortunaError),
}

/// Errors from the integer oracle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    /// `max` must be strictly greater than `min`.
    #[error("invalid range [{min}, {max})")]
    InvalidRange {
        /// Inclusive lower bound.
        min: i64,
        /// Exclusive upper bound.
        max: i64,
    },

    /// More distinct values requested than the range holds.
    #[error("invalid count {count} for a range of {span} values")]
    InvalidCount {
        /// Requested values.
        count: usize,
        /// Values available.
        span: u64,
    },

    /// The PRNG failed.
    #[error("prng: {0}")]
    Prng(#[from] FortunaError),
}
