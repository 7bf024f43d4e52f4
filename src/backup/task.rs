//! Background workers for backup and restore
//!
//! Each operation runs on its own thread so an interactive caller is never
//! blocked; the caller polls `is_finished` or blocks on `wait`.

use std::thread::{self, JoinHandle};

/// Result type a background operation can report, including for a worker
/// that died before producing one
pub trait Outcome: Send + 'static {
    fn failure(message: String) -> Self;
}

/// A backup or restore running off the caller's thread
pub struct BackgroundTask<T: Outcome> {
    handle: JoinHandle<T>,
}

impl<T: Outcome> BackgroundTask<T> {
    pub(crate) fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            handle: thread::spawn(work),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the operation completes and return its outcome
    pub fn wait(self) -> T {
        self.handle
            .join()
            .unwrap_or_else(|_| T::failure("background worker stopped unexpectedly".into()))
    }
}
