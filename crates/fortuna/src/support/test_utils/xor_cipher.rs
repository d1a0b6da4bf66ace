// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::cipher::BlockCipher;
use crate::error::FortunaError;

/// Block size of [`XorCipher`].
pub const XOR_BLOCK_SIZE: usize = 16;

/// Transparent "cipher" XOR-ing the input with the key.
///
/// Output is trivially predictable; it exists so tests can see exactly which
/// key and counter produced a block.
#[derive(Debug, Clone)]
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    /// Key the cipher was built with.
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl BlockCipher for XorCipher {
    fn block_size(&self) -> usize {
        XOR_BLOCK_SIZE
    }

    fn encrypt(&self, input: &[u8], output: &mut [u8]) {
        for (i, (out, byte)) in output.iter_mut().zip(input).enumerate() {
            *out = byte ^ self.key[i % self.key.len()];
        }
    }
}

/// Factory for [`XorCipher`]. Rejects empty keys.
pub fn new_xor_cipher(key: &[u8]) -> Result<XorCipher, FortunaError> {
    if key.is_empty() {
        return Err(FortunaError::CipherInit);
    }

    Ok(XorCipher { key: key.to_vec() })
}

/// Factory rejecting every key.
pub fn rejecting_cipher(_key: &[u8]) -> Result<XorCipher, FortunaError> {
    Err(FortunaError::CipherInit)
}
