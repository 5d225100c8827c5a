//! The shared last-reset timestamp and its locking discipline

use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// The counter's ground truth: when the last DNS failure was reported.
///
/// Reads happen once a second from the render loop and on every status
/// request, so they take a shared lock; writes are rare and human-triggered
/// and take the exclusive lock. A reader can never observe a half-updated
/// timestamp, and two concurrent resets serialize on the write lock with
/// one definite winner.
#[derive(Debug)]
pub struct TimerState {
    last_reset: RwLock<DateTime<Utc>>,
}

impl TimerState {
    /// Create the timer state seeded from persistence (or "now").
    pub fn new(last_reset: DateTime<Utc>) -> Self {
        Self {
            last_reset: RwLock::new(last_reset),
        }
    }

    /// Current reset timestamp. Safe from any number of concurrent readers.
    pub fn last_reset(&self) -> DateTime<Utc> {
        // A poisoned lock still holds a fully written timestamp.
        match self.last_reset.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the timestamp with the current time and return it.
    ///
    /// The wall clock is sampled under the write lock, so near-simultaneous
    /// resets get distinct, ordered timestamps and the stored value never
    /// rolls back to a stale one.
    pub fn reset_now(&self) -> DateTime<Utc> {
        let mut guard = match self.last_reset.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Utc::now();
        if now > *guard {
            *guard = now;
        }
        *guard
    }
}
