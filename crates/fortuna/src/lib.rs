// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # fortuna
//!
//! Fortuna cryptographically secure pseudorandom number generator
//! (Ferguson/Schneier, *Cryptography Engineering*, chapter 9).
//!
//! Entropy events are spread over a bank of pools. Pool `i` contributes to
//! every `2^i`-th reseed, so even if an attacker floods or predicts the fast
//! pools, some reseed eventually draws on a pool that collected enough real
//! entropy. Between reseeds the generator rekeys itself after every read.
//!
//! ## Core Types
//!
//! - [`Fortuna`]: accumulator (pools + reseed policy) around a generator
//! - [`Generator`]: AES-CTR style generator with mandatory rekeying
//! - [`Pool`]: double-SHA-256 entropy pool
//! - [`Counter`]: little-endian block counter
//! - [`SeedFile`]: single-use seed persistence
//!
//! ## Collaborators
//!
//! - [`Manager`]: one producer thread per [`EntropySource`]
//! - [`SystemEntropySource`]: OS CSPRNG samples (via `getrandom`)
//! - [`PeriodicSeedWriter`]: background seed file refresh
//! - [`Oracle`]: uniform integers in a range
//!
//! ## Example
//!
//! ```rust
//! use fortuna::{Fortuna, Prng};
//!
//! let fortuna = Fortuna::new().expect("Failed to create fortuna");
//!
//! // Unseeded reads fail.
//! assert!(fortuna.int63().is_err());
//!
//! fortuna.seed(42).expect("Failed to seed");
//!
//! let n = fortuna.int63().expect("Failed to draw");
//! assert!(n >= 0);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod cipher;
mod config;
mod counter;
mod error;
mod fortuna;
mod generator;
mod manager;
mod oracle;
mod periodic;
mod pool;
mod seed_file;
mod support;
mod system;
mod traits;

pub mod consts;

pub use cipher::{BlockCipher, CipherFactory, new_block_cipher};
pub use config::FortunaConfig;
pub use counter::Counter;
pub use error::{EntropyError, FortunaError, OracleError, SeedFileError};
pub use fortuna::Fortuna;
pub use generator::Generator;
pub use manager::Manager;
pub use oracle::Oracle;
pub use periodic::PeriodicSeedWriter;
pub use pool::Pool;
pub use seed_file::SeedFile;
pub use system::SystemEntropySource;
pub use traits::{Accumulator, EntropySource, Prng};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
