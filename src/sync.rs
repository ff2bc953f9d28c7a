//! Retrying the comparison cycle against a settling document.
//!
//! The target document is eventually consistent: content may appear, change,
//! and reflow while assertions run. The synchronizer therefore retries the
//! entire locate/extract/transform/compare cycle from scratch until it
//! succeeds or a deadline passes. Nothing extracted survives from one attempt
//! to the next; re-reading the live tree every iteration is the mechanism
//! that avoids stale reads.

use crate::error::{DiffError, ErrorKind};
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use tracing::debug;

/// Timing knobs for the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
    /// Overall deadline for the whole cycle, attempts included.
    pub timeout: Duration,
    /// Pause between attempts.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(50),
        }
    }
}

enum Attempt<T> {
    Success(T),
    Retryable(DiffError),
    Fatal(DiffError),
}

/// Drives `Attempting -> (Success | RetryableFailure -> Attempting |
/// FatalFailure)` under one external deadline check, keeping stack depth flat.
pub struct Synchronizer {
    config: SyncConfig,
    transient: FxHashSet<ErrorKind>,
}

impl Synchronizer {
    pub fn new(config: SyncConfig, transient: impl IntoIterator<Item = ErrorKind>) -> Synchronizer {
        Synchronizer {
            config,
            transient: transient.into_iter().collect(),
        }
    }

    /// The default transient set: comparison mismatches and document
    /// still-rendering errors. Missing locators are fatal unless the caller
    /// opts them in.
    pub fn default_transient() -> [ErrorKind; 2] {
        [ErrorKind::StructuralMismatch, ErrorKind::TransientDocument]
    }

    fn classify<T>(&self, outcome: Result<T, DiffError>) -> Attempt<T> {
        match outcome {
            Ok(value) => Attempt::Success(value),
            // Template errors are authoring mistakes; retrying cannot fix
            // them, whatever the caller declared.
            Err(err) if err.kind() == ErrorKind::InvalidTemplate => Attempt::Fatal(err),
            Err(err) if self.transient.contains(&err.kind()) => Attempt::Retryable(err),
            Err(err) => Attempt::Fatal(err),
        }
    }

    /// Run `cycle` until it succeeds, fails fatally, or the deadline passes,
    /// in which case the most recent failure is surfaced. The cycle always
    /// runs at least once.
    pub fn run<T>(
        &self,
        mut cycle: impl FnMut() -> Result<T, DiffError>,
    ) -> Result<T, DiffError> {
        let deadline = Instant::now() + self.config.timeout;
        loop {
            match self.classify(cycle()) {
                Attempt::Success(value) => return Ok(value),
                Attempt::Fatal(err) => return Err(err),
                Attempt::Retryable(err) => {
                    if Instant::now() >= deadline {
                        return Err(err);
                    }
                    debug!(error = %err, "retrying after transient failure");
                    std::thread::sleep(self.config.poll_interval);
                }
            }
        }
    }
}
