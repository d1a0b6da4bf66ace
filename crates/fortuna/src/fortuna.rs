// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The accumulator: pool bank, reseed policy and the generator they feed
//! (Ferguson/Schneier 9.5).

use std::io;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use aes::Aes256;
use rand_core::{TryCryptoRng, TryRngCore};
use sha2::Sha256;
use sha2::digest::{Digest, FixedOutputReset};
use tracing::debug;
use zeroize::Zeroizing;

use crate::cipher::{BlockCipher, new_block_cipher};
use crate::config::FortunaConfig;
use crate::consts::MAX_EVENT_SIZE;
use crate::error::FortunaError;
use crate::generator::Generator;
use crate::pool::Pool;
use crate::traits::{Accumulator, Prng};

/// Fortuna CSPRNG.
///
/// Pools and generator live behind one mutex; every public operation holds it
/// for its whole duration. The type is `Sync` and meant to be shared through an
/// [`Arc`](std::sync::Arc) between entropy producers and consumers.
///
/// # Example
///
/// ```rust
/// use fortuna::{Fortuna, Prng};
///
/// let fortuna = Fortuna::new().expect("Failed to create fortuna");
/// fortuna.seed_bytes(&[0x42; 32]).expect("Failed to seed");
///
/// let mut buf = [0u8; 64];
/// fortuna.read(&mut buf).expect("Failed to read");
/// ```
pub struct Fortuna<H = Sha256, C = Aes256> {
    config: FortunaConfig,
    state: Mutex<State<H, C>>,
}

pub(crate) struct State<H, C> {
    pub(crate) pools: Vec<Pool>,
    pub(crate) generator: Generator<H, C>,
    pub(crate) seeded_count: u64,
    pub(crate) reseed_not_before: Instant,
}

impl Fortuna {
    /// Creates an unseeded accumulator with 32 pools, SHA-256 and AES-256.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::CipherInit`] if the generator cannot be built.
    pub fn new() -> Result<Self, FortunaError> {
        Self::with_config(FortunaConfig::default())
    }

    /// Creates an unseeded accumulator with custom tuning.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidConfig`] for a rejected configuration.
    pub fn with_config(config: FortunaConfig) -> Result<Self, FortunaError> {
        let generator = Generator::new(Sha256::new(), new_block_cipher::<Aes256>)?;
        Self::with_generator(config, generator)
    }
}

impl<H, C> Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    /// Creates an accumulator around an existing (normally unseeded) generator.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidConfig`] for a rejected configuration.
    pub fn with_generator(
        config: FortunaConfig,
        generator: Generator<H, C>,
    ) -> Result<Self, FortunaError> {
        config.validate()?;

        let state = State {
            pools: (0..config.pools).map(|_| Pool::new()).collect(),
            generator,
            seeded_count: 0,
            reseed_not_before: Instant::now(),
        };

        Ok(Self {
            config,
            state: Mutex::new(state),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &FortunaConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, State<H, C>>, FortunaError> {
        self.state.lock().map_err(|_| FortunaError::MutexPoisoned)
    }

    /// Number of completed reseeds.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::MutexPoisoned`] if a holder of the lock panicked.
    pub fn seeded_count(&self) -> Result<u64, FortunaError> {
        Ok(self.lock()?.seeded_count)
    }

    /// Delivers `seed` (big-endian) straight to pool 0, forcing a reseed.
    ///
    /// # Errors
    ///
    /// See [`Fortuna::add_random_event`].
    pub fn seed(&self, seed: i64) -> Result<(), FortunaError> {
        self.add_random_event(0, 0, &seed.to_be_bytes())
    }

    /// Delivers `seed` straight to pool 0, forcing a reseed.
    ///
    /// # Errors
    ///
    /// See [`Fortuna::add_random_event`]; seeds longer than 255 bytes are rejected.
    pub fn seed_bytes(&self, seed: &[u8]) -> Result<(), FortunaError> {
        self.add_random_event(0, 0, seed)
    }

    /// Adds `event` from source `source_id` to pool `pool_id` (9.5.6).
    ///
    /// The pool receives `[source_id, len]` followed by the event. An event
    /// routed to pool 0 reseeds immediately, bypassing both the pool size
    /// threshold and the reseed cool-down.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::InvalidPool`] or [`FortunaError::EventTooLarge`]
    /// for rejected events, and propagates reseed failures.
    pub fn add_random_event(
        &self,
        source_id: u8,
        pool_id: usize,
        event: &[u8],
    ) -> Result<(), FortunaError> {
        if event.len() > MAX_EVENT_SIZE {
            return Err(FortunaError::EventTooLarge { len: event.len() });
        }

        let mut state = self.lock()?;
        let pools = state.pools.len();
        let pool = state
            .pools
            .get_mut(pool_id)
            .ok_or(FortunaError::InvalidPool { pool_id, pools })?;

        pool.write(&[source_id, event.len() as u8]);
        pool.write(event);

        // Pool 0 reseeds unconditionally. This lets pool-0 traffic reseed
        // faster than the cool-down; kept as a reviewed decision.
        if pool_id == 0 {
            state.reseed(&self.config)?;
        }

        Ok(())
    }

    /// Fills `dest`, reseeding first if pool 0 holds enough entropy.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::NotInitialized`] until the first reseed.
    pub fn read(&self, dest: &mut [u8]) -> Result<usize, FortunaError> {
        let mut state = self.ready()?;
        state.generator.read(dest)
    }

    /// Draws a non-negative 63-bit integer, reseeding first if due.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::NotInitialized`] until the first reseed.
    pub fn int63(&self) -> Result<i64, FortunaError> {
        let mut state = self.ready()?;
        state.generator.int63()
    }

    fn ready(&self) -> Result<MutexGuard<'_, State<H, C>>, FortunaError> {
        let mut state = self.lock()?;

        if state.should_reseed(&self.config, Instant::now()) {
            state.reseed(&self.config)?;
        }

        if state.seeded_count == 0 {
            return Err(FortunaError::NotInitialized);
        }

        Ok(state)
    }

    #[cfg(test)]
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut State<H, C>) -> R) -> R {
        let mut state = self.state.lock().expect("Failed to lock state");
        f(&mut state)
    }
}

impl<H, C> State<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    pub(crate) fn should_reseed(&self, config: &FortunaConfig, now: Instant) -> bool {
        self.pools[0].size() > config.min_pool_size && now >= self.reseed_not_before
    }

    /// Drains pool `i` every `2^i` reseeds into the generator (9.5.5).
    pub(crate) fn reseed(&mut self, config: &FortunaConfig) -> Result<(), FortunaError> {
        let mut drained = 0usize;

        for (i, pool) in self.pools.iter_mut().enumerate() {
            if self.seeded_count % (1u64 << i) != 0 {
                break;
            }

            let digest = Zeroizing::new(pool.sum());
            self.generator.mix(&*digest);
            drained += 1;
        }

        self.generator.reseed()?;

        self.seeded_count += 1;
        self.reseed_not_before = Instant::now() + config.reseed_interval;

        debug!(
            seeded_count = self.seeded_count,
            pools_drained = drained,
            "fortuna reseeded"
        );

        Ok(())
    }
}

impl<H, C> Accumulator for Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    fn add_random_event(
        &self,
        source_id: u8,
        pool_id: usize,
        event: &[u8],
    ) -> Result<(), FortunaError> {
        Fortuna::add_random_event(self, source_id, pool_id, event)
    }
}

impl<H, C> Prng for Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    fn read(&self, dest: &mut [u8]) -> Result<usize, FortunaError> {
        Fortuna::read(self, dest)
    }

    fn int63(&self) -> Result<i64, FortunaError> {
        Fortuna::int63(self)
    }
}

impl<H, C> io::Read for &Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Fortuna::read(self, buf).map_err(io::Error::other)
    }
}

impl<H, C> TryRngCore for Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    type Error = FortunaError;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        let mut bytes = [0u8; 4];
        Fortuna::read(self, &mut bytes)?;

        Ok(u32::from_le_bytes(bytes))
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        let mut bytes = [0u8; 8];
        Fortuna::read(self, &mut bytes)?;

        Ok(u64::from_le_bytes(bytes))
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), Self::Error> {
        Fortuna::read(self, dst).map(|_| ())
    }
}

impl<H, C> TryCryptoRng for Fortuna<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
}

impl<H, C> core::fmt::Debug for Fortuna<H, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Fortuna")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
