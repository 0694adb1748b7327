//! Cancellable tick source for the session's elapsed counter
//!
//! The session itself counts seconds through [`QuizSession::tick`]; this
//! module supplies real-time ticks from a background thread. Cancellation is
//! guaranteed: dropping the [`Ticker`] (or calling
//! [`cancel`](Ticker::cancel)) disconnects the control channel, which wakes
//! the thread immediately out of its wait, so teardown never leaks a running
//! timer and never blocks for a full interval.
//!
//! [`QuizSession::tick`]: crate::core::session::QuizSession::tick

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A background thread invoking a callback at a fixed interval
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawn a ticker firing `on_tick` once per `interval`
    ///
    /// The callback runs on the ticker thread; wrap shared state in the
    /// synchronization of your choice (the CLI uses `Arc<Mutex<_>>`).
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => on_tick(),
                // Explicit stop or sender dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Spawn a ticker firing once per second
    pub fn every_second<F>(on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::spawn(Duration::from_secs(1), on_tick)
    }

    /// Stop the ticker and wait for its thread to exit
    ///
    /// Idempotent; also invoked by `Drop`.
    pub fn cancel(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
