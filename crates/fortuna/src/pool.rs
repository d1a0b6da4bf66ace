// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::consts::POOL_DIGEST_SIZE;

/// One entropy pool: a running SHA-256 over every event written since the
/// last drain (9.5.2).
#[derive(Clone, Default)]
pub struct Pool {
    hash: Sha256,
    size: usize,
}

impl Pool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `data` to the running hash.
    pub fn write(&mut self, data: &[u8]) {
        self.size += data.len();
        self.hash.update(data);
    }

    /// Bytes written since the last [`Pool::sum`].
    pub fn size(&self) -> usize {
        self.size
    }

    /// Drains the pool, returning `SHA-256(SHA-256(accumulated))` (9.5.5).
    ///
    /// The pool is empty afterwards: a second call returns the double hash
    /// of the empty string.
    pub fn sum(&mut self) -> [u8; POOL_DIGEST_SIZE] {
        let mut round1: [u8; POOL_DIGEST_SIZE] = self.hash.finalize_reset().into();

        self.hash.update(round1);
        let round2: [u8; POOL_DIGEST_SIZE] = self.hash.finalize_reset().into();

        round1.zeroize();
        self.size = 0;

        round2
    }
}

impl core::fmt::Debug for Pool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pool").field("size", &self.size).finish()
    }
}
