// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Background task refreshing the seed file on a fixed period.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::seed_file::SeedFile;
use crate::traits::Prng;

/// Handle to a thread calling [`SeedFile::write`] every `interval`.
///
/// Stopping (or dropping) the handle cancels the schedule and joins the
/// thread. It does not write a final seed; callers do that on shutdown.
#[derive(Debug)]
pub struct PeriodicSeedWriter {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicSeedWriter {
    /// Starts the writer thread.
    pub fn spawn<P>(seed_file: SeedFile<P>, interval: Duration) -> Self
    where
        P: Prng + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if let Err(err) = seed_file.write() {
                            warn!(path = %seed_file.path().display(), error = %err, "seed file write failed");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }

            debug!("periodic seed writer stopped");
        });

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Cancels the schedule and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // Receiver gone means the thread already exited.
            let _ = stop.send(());
        }

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("periodic seed writer panicked");
            }
        }
    }
}

impl Drop for PeriodicSeedWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
