// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::collections::VecDeque;

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Configurable behavior for [`MockEntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntropySourceBehaviour {
    /// Hand out the scripted samples, then report exhaustion.
    None,
    /// Always fail.
    FailAlways,
    /// Fail on the Nth call (1-indexed: 1 = first call fails).
    FailAtNthEntropy(usize),
}

/// Scripted entropy source for testing.
#[derive(Debug)]
pub struct MockEntropySource {
    samples: VecDeque<Vec<u8>>,
    behaviour: MockEntropySourceBehaviour,
    entropy_count: usize,
}

impl MockEntropySource {
    /// Creates a source yielding `samples` in order.
    pub fn new(samples: Vec<Vec<u8>>, behaviour: MockEntropySourceBehaviour) -> Self {
        Self {
            samples: samples.into(),
            behaviour,
            entropy_count: 0,
        }
    }

    /// Creates a source yielding `count` samples of `len` bytes each.
    pub fn repeating(count: usize, len: usize) -> Self {
        let samples = (0..count).map(|i| vec![i as u8; len]).collect();
        Self::new(samples, MockEntropySourceBehaviour::None)
    }

    /// Changes the mock behavior at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockEntropySourceBehaviour) {
        self.behaviour = behaviour;
    }

    /// Returns the current call count.
    pub fn call_count(&self) -> usize {
        self.entropy_count
    }
}

impl EntropySource for MockEntropySource {
    fn entropy(&mut self) -> Result<Vec<u8>, EntropyError> {
        self.entropy_count += 1;

        match self.behaviour {
            MockEntropySourceBehaviour::FailAlways => Err(EntropyError::EntropyNotAvailable),
            MockEntropySourceBehaviour::FailAtNthEntropy(n) if self.entropy_count == n => {
                Err(EntropyError::EntropyNotAvailable)
            }
            _ => self.samples.pop_front().ok_or(EntropyError::Exhausted),
        }
    }
}
