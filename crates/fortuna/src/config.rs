// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::time::Duration;

use crate::consts::{MAX_POOLS, MIN_POOL_SIZE, NUM_POOLS, RESEED_INTERVAL};
use crate::error::FortunaError;

/// Accumulator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortunaConfig {
    /// Number of entropy pools, `1..=64`.
    pub pools: usize,
    /// Bytes pool 0 must exceed before a read reseeds.
    pub min_pool_size: usize,
    /// Cool-down after every reseed.
    pub reseed_interval: Duration,
}

impl Default for FortunaConfig {
    fn default() -> Self {
        Self {
            pools: NUM_POOLS,
            min_pool_size: MIN_POOL_SIZE,
            reseed_interval: RESEED_INTERVAL,
        }
    }
}

impl FortunaConfig {
    /// Checks the configuration before any state is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidConfig`] for an empty or oversized pool
    /// bank, or a zero minimum pool size.
    pub fn validate(&self) -> Result<(), FortunaError> {
        if self.pools == 0 {
            return Err(FortunaError::InvalidConfig("at least one pool is required"));
        }

        if self.pools > MAX_POOLS {
            return Err(FortunaError::InvalidConfig("at most 64 pools are supported"));
        }

        if self.min_pool_size == 0 {
            return Err(FortunaError::InvalidConfig("minimum pool size must be positive"));
        }

        Ok(())
    }
}
