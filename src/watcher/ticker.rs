// src/watcher/ticker.rs

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Paces the polling loop between iterations.
pub trait Ticker {
    /// Block until the next iteration is due. Returns `false` once the loop
    /// should stop.
    fn wait(&mut self) -> bool;
}

/// Waits a fixed interval; can be cancelled from another thread.
pub struct IntervalTicker {
    interval: Duration,
    stop_rx: Receiver<()>,
}

/// Cancels the paired [`IntervalTicker`]. Dropping it does not stop the
/// ticker.
#[derive(Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        // full: a stop is already pending; disconnected: the loop already ended
        let _ = self.tx.try_send(());
    }
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> (Self, StopHandle) {
        let (tx, stop_rx) = crossbeam_channel::bounded(1);
        (Self { interval, stop_rx }, StopHandle { tx })
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) -> bool {
        match self.stop_rx.recv_timeout(self.interval) {
            Ok(()) => false,
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(self.interval);
                true
            }
        }
    }
}
