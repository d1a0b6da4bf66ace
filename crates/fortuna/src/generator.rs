// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Block-cipher based generator (Ferguson/Schneier 9.4).
//!
//! Output is the encryption of successive counter values. After every read the
//! generator switches to a key drawn from its own output, so a key that ever
//! produced visible output is gone before the read returns.

use sha2::digest::{Digest, FixedOutputReset};
use zeroize::{Zeroize, Zeroizing};

use crate::cipher::{BlockCipher, CipherFactory};
use crate::consts::{KEY_SIZE, MAX_BYTES_PER_REQUEST};
use crate::counter::Counter;
use crate::error::FortunaError;

const BYTE_SIZE: usize = 8;

/// Forward-secure pseudorandom byte stream.
///
/// `H` mixes reseed material into the next key; `C` is rebuilt through the
/// factory every time the key changes, so cipher and key never drift apart.
pub struct Generator<H, C> {
    key: Zeroizing<Vec<u8>>,
    hash: H,
    cipher: C,
    counter: Counter,
    new_cipher: CipherFactory<C>,
    block: Zeroizing<Vec<u8>>,
}

impl<H, C> Generator<H, C>
where
    H: Digest + FixedOutputReset,
    C: BlockCipher,
{
    /// Builds an unseeded generator with an all-zero key.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::CipherInit`] if the factory rejects the zero key.
    pub fn new(hash: H, new_cipher: CipherFactory<C>) -> Result<Self, FortunaError> {
        let key = Zeroizing::new(vec![0u8; KEY_SIZE]);
        let cipher = new_cipher(&key)?;
        let counter = Counter::new(cipher.block_size() * BYTE_SIZE)?;
        let block = Zeroizing::new(vec![0u8; counter.len()]);

        let mut generator = Self {
            key,
            hash,
            cipher,
            counter,
            new_cipher,
            block,
        };
        generator.mix_key();

        Ok(generator)
    }

    /// Seeds from a 64-bit value, encoded big-endian.
    ///
    /// # Errors
    ///
    /// See [`Generator::seed_bytes`].
    pub fn seed(&mut self, seed: i64) -> Result<(), FortunaError> {
        self.seed_bytes(&seed.to_be_bytes())
    }

    /// Mixes `seed` into the key and reseeds.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::CipherInit`] if the cipher rejects the new key.
    /// The generator state is no longer trustworthy at that point.
    pub fn seed_bytes(&mut self, seed: &[u8]) -> Result<(), FortunaError> {
        self.mix(seed);
        self.reseed()
    }

    /// Feeds reseed material into the mixing hash without switching keys.
    pub(crate) fn mix(&mut self, data: &[u8]) {
        Digest::update(&mut self.hash, data);
    }

    /// Switches to `key = H(previous key || mixed material)` (9.4.2).
    pub(crate) fn reseed(&mut self) -> Result<(), FortunaError> {
        let digest = Digest::finalize_reset(&mut self.hash);

        self.key.zeroize();
        self.key.extend_from_slice(&digest);
        self.counter.increment();

        self.update_cipher()
    }

    fn update_cipher(&mut self) -> Result<(), FortunaError> {
        self.cipher = (self.new_cipher)(&self.key)?;
        self.mix_key();

        Ok(())
    }

    fn mix_key(&mut self) {
        Digest::reset(&mut self.hash);
        Digest::update(&mut self.hash, &*self.key);
    }

    /// Replaces the key with fresh generator output (9.4.4).
    fn rekey(&mut self) -> Result<(), FortunaError> {
        let mut key = Zeroizing::new(vec![0u8; self.key.len()]);
        let mut filled = 0;

        while filled < key.len() {
            filled += self.read_block(&mut key[filled..]);
        }

        self.key.copy_from_slice(&key);

        self.update_cipher()
    }

    /// Encrypts the counter into the scratch block, copies at most one block
    /// into `out` and advances the counter.
    fn read_block(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.block.len());

        self.cipher.encrypt(self.counter.as_bytes(), &mut self.block);
        self.counter.increment();

        out[..n].copy_from_slice(&self.block[..n]);
        n
    }

    /// Fills `dest` with generator output and rekeys before returning.
    ///
    /// Long reads also rekey after every [`MAX_BYTES_PER_REQUEST`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FortunaError::NotSeeded`] if the generator was never reseeded,
    /// or [`FortunaError::CipherInit`] if rekeying fails.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, FortunaError> {
        if self.counter.is_zero() {
            return Err(FortunaError::NotSeeded);
        }

        let mut written = 0;
        let mut since_rekey = 0;

        while written < dest.len() {
            let n = self.read_block(&mut dest[written..]);
            written += n;
            since_rekey += n;

            if since_rekey >= MAX_BYTES_PER_REQUEST && written < dest.len() {
                self.rekey()?;
                since_rekey = 0;
            }
        }

        self.block.as_mut_slice().zeroize();
        self.rekey()?;

        Ok(written)
    }

    /// Non-negative integer from 8 bytes of output.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::read`].
    pub fn int63(&mut self) -> Result<i64, FortunaError> {
        let mut bytes = Zeroizing::new([0u8; 8]);
        self.read(&mut *bytes)?;

        Ok(pack_int63(&bytes))
    }

    /// True once at least one reseed happened.
    pub fn is_seeded(&self) -> bool {
        !self.counter.is_zero()
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> &Counter {
        &self.counter
    }
}

/// Packs 7 bits of every byte, little-endian, into a non-negative `i64`.
pub(crate) fn pack_int63(bytes: &[u8; 8]) -> i64 {
    bytes
        .iter()
        .enumerate()
        .fold(0i64, |acc, (i, byte)| acc | (i64::from(byte & 0x7F) << (7 * i)))
}

impl<H, C> core::fmt::Debug for Generator<H, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generator")
            .field("seeded", &!self.counter.is_zero())
            .finish_non_exhaustive()
    }
}
