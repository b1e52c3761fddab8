//! Poller: cancellable fixed-interval wait-for-state loop.
//!
//! Replaces raw interval handles with an explicit abstraction: the first check
//! runs before any sleep (a state that is already good never waits a tick), the
//! loop self-cancels on completion or deadline, and everything rides on
//! `tokio::time` so tests drive it with paused simulated time.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Outcome of a [`Poller::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The tick closure reported completion with this value.
    Completed(T),
    /// The deadline elapsed without any tick completing.
    TimedOut,
}

impl<T> PollOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            PollOutcome::Completed(v) => Some(v),
            PollOutcome::TimedOut => None,
        }
    }
}

/// Fixed-interval poller with a hard deadline.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    max_wait: Duration,
}

impl Poller {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Run `tick` until it returns `Some`, or until `max_wait` elapses.
    ///
    /// The first tick runs immediately; subsequent ticks are separated by
    /// `interval`. A tick that straddles the deadline still completes — the
    /// deadline only prevents *scheduling* further ticks.
    pub async fn run<T, F, Fut>(&self, mut tick: F) -> PollOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let deadline = Instant::now() + self.max_wait;
        loop {
            if let Some(value) = tick().await {
                return PollOutcome::Completed(value);
            }
            if Instant::now() + self.interval > deadline {
                return PollOutcome::TimedOut;
            }
            sleep(self.interval).await;
        }
    }
}
