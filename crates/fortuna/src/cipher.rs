// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Block cipher seam used by the generator.
//!
//! Every RustCrypto cipher implementing [`BlockEncrypt`] is a [`BlockCipher`],
//! so `Aes256` works out of the box. Tests plug in transparent ciphers through
//! the same trait.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, BlockSizeUser, KeyInit};

use crate::error::FortunaError;

/// Builds a cipher keyed by the given bytes.
pub type CipherFactory<C> = fn(&[u8]) -> Result<C, FortunaError>;

/// Minimal block encryption interface.
pub trait BlockCipher {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encrypts one full block from `input` into `output`.
    ///
    /// Both slices are exactly [`BlockCipher::block_size`] bytes long.
    fn encrypt(&self, input: &[u8], output: &mut [u8]);
}

impl<T: BlockEncrypt> BlockCipher for T {
    fn block_size(&self) -> usize {
        <T as BlockSizeUser>::block_size()
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8]) {
        BlockEncrypt::encrypt_block_b2b(
            self,
            GenericArray::from_slice(input),
            GenericArray::from_mut_slice(output),
        );
    }
}

/// Cipher factory for any RustCrypto block cipher, e.g.
/// `new_block_cipher::<aes::Aes256>`.
///
/// # Errors
///
/// Returns [`FortunaError::CipherInit`] if the key length does not match the cipher.
pub fn new_block_cipher<C: KeyInit>(key: &[u8]) -> Result<C, FortunaError> {
    C::new_from_slice(key).map_err(|_| FortunaError::CipherInit)
}
