// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Shared constants for the accumulator, generator and seed file.

use std::time::Duration;

/// Default number of entropy pools (Ferguson/Schneier 9.5.2).
pub const NUM_POOLS: usize = 32;

/// Upper bound on the pool count: pool `i` drains every `2^i` reseeds and the
/// reseed count is a `u64`.
pub const MAX_POOLS: usize = 64;

/// Bytes pool 0 must exceed before a read triggers a reseed (9.5.5).
pub const MIN_POOL_SIZE: usize = 64;

/// Cool-down applied after every reseed.
pub const RESEED_INTERVAL: Duration = Duration::from_millis(100);

/// Generator key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Largest amount of output produced under one key within a single read.
pub const MAX_BYTES_PER_REQUEST: usize = 1 << 20;

/// Largest entropy event: its length is encoded in one byte.
pub const MAX_EVENT_SIZE: usize = u8::MAX as usize;

/// Size of a pool digest (SHA-256).
pub const POOL_DIGEST_SIZE: usize = 32;

/// Size of a persisted seed.
pub const SEED_FILE_SIZE: usize = 64;

/// Default period of the background seed file writer.
pub const SEED_FILE_INTERVAL: Duration = Duration::from_secs(60);
