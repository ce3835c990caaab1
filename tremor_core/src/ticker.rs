//! Background tick source for the timed tests.
//!
//! A `Ticker` owns one thread that emits its run generation on a channel once
//! per period. The owner drains the channel and feeds each tick to the timer
//! state machine, which drops ticks whose generation is stale.
//!
//! Each `Ticker` spawns exactly one thread. Cancelling (explicitly or on drop)
//! wakes the thread immediately and joins it, so no tick can be produced after
//! `cancel` returns.
use crossbeam_channel as xch;
use std::time::{Duration, Instant};

pub struct Ticker {
    rx: xch::Receiver<u64>,
    generation: u64,
    /// Dropping this sender wakes the thread out of its period wait.
    stop: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(generation: u64, period: Duration) -> Self {
        let (tx, rx) = xch::unbounded();
        let (stop_tx, stop_rx) = xch::bounded::<()>(0);
        let period = period.max(Duration::from_millis(1));

        let join_handle = std::thread::spawn(move || {
            // Deadlines advance by whole periods so slow consumers do not
            // stretch the schedule.
            let mut deadline = Instant::now() + period;
            loop {
                match stop_rx.recv_deadline(deadline) {
                    Err(xch::RecvTimeoutError::Timeout) => {
                        if tx.send(generation).is_err() {
                            tracing::debug!(generation, "ticker consumer disconnected, exiting");
                            break;
                        }
                        tracing::trace!(generation, "tick");
                        deadline += period;
                    }
                    // Stop sender dropped (or an explicit stop message).
                    Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => {
                        tracing::debug!(generation, "ticker received cancel");
                        break;
                    }
                }
            }
            tracing::trace!(generation, "ticker thread exiting cleanly");
        });

        Self {
            rx,
            generation,
            stop: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Next pending tick without blocking.
    pub fn try_recv(&self) -> Option<u64> {
        self.rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next tick.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<u64> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.join_handle.is_none()
    }

    /// Stop the thread and wait for it. Idempotent.
    pub fn cancel(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!(generation = self.generation, "ticker joined"),
                Err(e) => {
                    tracing::warn!(?e, generation = self.generation, "ticker thread panicked");
                }
            }
        }
        // Ticks already queued belong to a cancelled run.
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl core::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ticker")
            .field("generation", &self.generation)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
