// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fans entropy sources out across the accumulator's pools.

use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use tracing::{error, trace, warn};

use crate::consts::MAX_EVENT_SIZE;
use crate::error::FortunaError;
use crate::traits::{Accumulator, EntropySource};

const SOURCE_IDS: u8 = u8::MAX;

/// Assigns source ids and runs one producer thread per entropy source.
#[derive(Debug)]
pub struct Manager {
    pools: usize,
    next_id: Mutex<u8>,
}

impl Manager {
    /// Creates a manager distributing events round-robin over `pools` pools.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidConfig`] if `pools` is zero.
    pub fn new(pools: usize) -> Result<Self, FortunaError> {
        if pools == 0 {
            return Err(FortunaError::InvalidConfig("at least one pool is required"));
        }

        Ok(Self {
            pools,
            next_id: Mutex::new(0),
        })
    }

    /// Starts a producer feeding `src` into `dst` (9.5.6).
    ///
    /// The producer cycles through pools `0..pools`. Samples longer than 255
    /// bytes are truncated. Rejected events are logged and skipped; a source
    /// error or a fatal accumulator error ends the producer.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::MutexPoisoned`] if the id allocator is poisoned.
    pub fn accumulate<A, S>(&self, dst: A, mut src: S) -> Result<JoinHandle<()>, FortunaError>
    where
        A: Accumulator + Send + 'static,
        S: EntropySource + Send + 'static,
    {
        let source_id = {
            let mut next_id = self.next_id.lock().map_err(|_| FortunaError::MutexPoisoned)?;
            let id = *next_id;
            *next_id = (id + 1) % SOURCE_IDS;
            id
        };
        let pools = self.pools;

        let handle = thread::spawn(move || {
            let mut pool_id = 0;

            loop {
                let sample = match src.entropy() {
                    Ok(sample) => sample,
                    Err(err) => {
                        warn!(source_id, error = %err, "entropy source stopped");
                        return;
                    }
                };

                if sample.len() > MAX_EVENT_SIZE {
                    trace!(source_id, len = sample.len(), "truncating entropy event");
                }
                let event = &sample[..sample.len().min(MAX_EVENT_SIZE)];

                match dst.add_random_event(source_id, pool_id, event) {
                    Ok(()) => {}
                    Err(err) if err.is_fatal() => {
                        error!(source_id, pool_id, error = %err, "accumulator unusable, producer stopped");
                        return;
                    }
                    Err(err) => {
                        warn!(source_id, pool_id, error = %err, "entropy event rejected");
                    }
                }

                pool_id = (pool_id + 1) % pools;
            }
        });

        Ok(handle)
    }
}
