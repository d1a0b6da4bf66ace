// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::atomic::{AtomicUsize, Ordering};

use aes::Aes256;
use proptest::prelude::*;
use sha2::{Digest, Sha256};

use crate::cipher::new_block_cipher;
use crate::consts::{KEY_SIZE, MAX_BYTES_PER_REQUEST};
use crate::error::FortunaError;
use crate::generator::{Generator, pack_int63};
use crate::support::test_utils::{XorCipher, new_xor_cipher, rejecting_cipher};

fn aes_generator() -> Generator<Sha256, Aes256> {
    Generator::new(Sha256::new(), new_block_cipher::<Aes256>).expect("Failed to create generator")
}

fn xor_generator() -> Generator<Sha256, XorCipher> {
    Generator::new(Sha256::new(), new_xor_cipher).expect("Failed to create generator")
}

#[test]
fn test_new_rejected_zero_key_fails() {
    let result = Generator::new(Sha256::new(), rejecting_cipher);

    assert!(matches!(result, Err(FortunaError::CipherInit)));
}

#[test]
fn test_new_fails_when_cipher_rejects_key_size() {
    let result = Generator::new(Sha256::new(), new_block_cipher::<aes::Aes128>);

    assert!(matches!(result, Err(FortunaError::CipherInit)));
}

#[test]
fn test_new_generator_is_unseeded() {
    let mut generator = aes_generator();
    let mut buf = [0u8; 16];

    assert!(!generator.is_seeded());
    assert!(generator.counter().is_zero());
    assert!(matches!(
        generator.read(&mut buf),
        Err(FortunaError::NotSeeded)
    ));
    assert!(matches!(generator.int63(), Err(FortunaError::NotSeeded)));
}

#[test]
fn test_seed_key_is_hash_of_zero_key_and_seed() {
    let mut generator = aes_generator();
    generator.seed_bytes(b"seed material").expect("Failed to seed");

    let mut expected = Sha256::new();
    expected.update([0u8; KEY_SIZE]);
    expected.update(b"seed material");

    assert_eq!(generator.key(), expected.finalize().as_slice());
    assert_eq!(generator.counter().value(), 1);
}

#[test]
fn test_seed_i64_is_big_endian_seed_bytes() {
    let mut a = aes_generator();
    let mut b = aes_generator();

    a.seed(0x0102_0304_0506_0708).expect("Failed to seed");
    b.seed_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]).expect("Failed to seed");

    assert_eq!(a.key(), b.key());
}

#[test]
fn test_read_fills_buffer() {
    let mut generator = aes_generator();
    generator.seed(1).expect("Failed to seed");

    let mut buf = [0u8; 1000];
    let n = generator.read(&mut buf).expect("Failed to read");

    assert_eq!(n, buf.len());
    assert!(buf.iter().any(|b| *b != 0));
}

#[test]
fn test_read_empty_buffer_still_rekeys() {
    let mut generator = aes_generator();
    generator.seed(1).expect("Failed to seed");

    let key_before = generator.key().to_vec();
    let n = generator.read(&mut []).expect("Failed to read");

    assert_eq!(n, 0);
    assert_ne!(generator.key(), key_before.as_slice());
}

#[test]
fn test_same_seed_same_stream() {
    let mut a = aes_generator();
    let mut b = aes_generator();

    a.seed_bytes(&[7; 32]).expect("Failed to seed");
    b.seed_bytes(&[7; 32]).expect("Failed to seed");

    let mut out_a = [0u8; 333];
    let mut out_b = [0u8; 333];
    a.read(&mut out_a).expect("Failed to read");
    b.read(&mut out_b).expect("Failed to read");

    assert_eq!(out_a, out_b);
}

#[test]
fn test_consecutive_reads_differ() {
    let mut generator = aes_generator();
    generator.seed(99).expect("Failed to seed");

    let mut first = [0u8; 64];
    let mut second = [0u8; 64];
    generator.read(&mut first).expect("Failed to read");
    generator.read(&mut second).expect("Failed to read");

    assert_ne!(first, second);
}

#[test]
fn test_read_output_is_counter_mode_under_current_key() {
    let mut generator = xor_generator();
    generator.seed(5).expect("Failed to seed");

    let key = generator.key().to_vec();
    let mut counter = generator.counter().clone();

    let mut out = [0u8; 40];
    generator.read(&mut out).expect("Failed to read");

    let mut expected = Vec::new();
    for _ in 0..3 {
        let block: Vec<u8> = counter
            .as_bytes()
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ key[i % key.len()])
            .collect();
        expected.extend_from_slice(&block);
        counter.increment();
    }

    assert_eq!(&out[..], &expected[..40]);
}

#[test]
fn test_rekey_draws_full_key_from_output() {
    let mut generator = xor_generator();
    generator.seed(5).expect("Failed to seed");

    let key = generator.key().to_vec();
    let mut counter = generator.counter().clone();

    // One block of output, then two blocks for the 32-byte rekey.
    generator.read(&mut [0u8; 16]).expect("Failed to read");
    counter.increment();

    let mut expected = Vec::new();
    for _ in 0..2 {
        expected.extend(
            counter
                .as_bytes()
                .iter()
                .enumerate()
                .map(|(i, b)| b ^ key[i % key.len()]),
        );
        counter.increment();
    }

    assert_eq!(generator.key(), expected.as_slice());
    assert_eq!(generator.counter(), &counter);
}

#[test]
fn test_read_of_max_bytes_rekeys_once() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counting_cipher(key: &[u8]) -> Result<XorCipher, FortunaError> {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        new_xor_cipher(key)
    }

    let mut generator =
        Generator::new(Sha256::new(), counting_cipher).expect("Failed to create generator");
    generator.seed(1).expect("Failed to seed");
    assert_eq!(BUILDS.load(Ordering::SeqCst), 2);

    let mut buf = vec![0u8; MAX_BYTES_PER_REQUEST];
    generator.read(&mut buf).expect("Failed to read");

    assert_eq!(BUILDS.load(Ordering::SeqCst), 3);
}

#[test]
fn test_read_past_max_bytes_rekeys_mid_stream() {
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn counting_cipher(key: &[u8]) -> Result<XorCipher, FortunaError> {
        BUILDS.fetch_add(1, Ordering::SeqCst);
        new_xor_cipher(key)
    }

    let mut generator =
        Generator::new(Sha256::new(), counting_cipher).expect("Failed to create generator");
    generator.seed(1).expect("Failed to seed");

    let key_before = generator.key().to_vec();
    let mut buf = vec![0u8; MAX_BYTES_PER_REQUEST + 1];
    generator.read(&mut buf).expect("Failed to read");

    // New, seed, mid-stream rekey, final rekey.
    assert_eq!(BUILDS.load(Ordering::SeqCst), 4);
    assert_ne!(generator.key(), key_before.as_slice());

    // XorCipher blocks are `counter ^ key`: the final byte comes from the
    // key drawn at the 1 MiB boundary, not from the starting key.
    let mut counter = crate::counter::Counter::new(128).expect("Failed to create counter");
    counter.increment();
    for _ in 0..MAX_BYTES_PER_REQUEST / 16 {
        counter.increment();
    }
    // First byte of the boundary block under the starting key: both what an
    // unrekeyed stream would emit next and the first byte of the new key.
    let boundary_byte = counter.as_bytes()[0] ^ key_before[0];

    counter.increment();
    counter.increment();
    let expected = counter.as_bytes()[0] ^ boundary_byte;

    assert_eq!(buf[MAX_BYTES_PER_REQUEST], expected);
    assert_ne!(buf[MAX_BYTES_PER_REQUEST], boundary_byte);
}

#[test]
fn test_int63_is_non_negative() {
    let mut generator = aes_generator();
    generator.seed(1234).expect("Failed to seed");

    for _ in 0..10_000 {
        let n = generator.int63().expect("Failed to draw");
        assert!(n >= 0);
    }
}

#[test]
fn test_pack_int63_masks_high_bits() {
    assert_eq!(pack_int63(&[0xFF; 8]), (1i64 << 56) - 1);
    assert_eq!(pack_int63(&[0x80; 8]), 0);
    assert_eq!(pack_int63(&[1, 0, 0, 0, 0, 0, 0, 0]), 1);
    assert_eq!(pack_int63(&[0, 1, 0, 0, 0, 0, 0, 0]), 1 << 7);
}

proptest! {
    #[test]
    fn pack_int63_is_never_negative(bytes in any::<[u8; 8]>()) {
        prop_assert!(pack_int63(&bytes) >= 0);
    }
}
