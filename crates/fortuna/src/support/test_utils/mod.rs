// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for mocking entropy sources and block ciphers.
//!
//! Provides mock implementations with configurable behavior for testing.

mod mock_entropy_source;
mod xor_cipher;

pub use mock_entropy_source::{MockEntropySource, MockEntropySourceBehaviour};
pub use xor_cipher::{XOR_BLOCK_SIZE, XorCipher, new_xor_cipher, rejecting_cipher};
