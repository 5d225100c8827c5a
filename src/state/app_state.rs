//! Main application state management

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::services::ResetCue;
use crate::storage::StateStore;

use super::TimerState;

/// Which writer triggered a reset. Logged so button presses and remote
/// requests can be told apart after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetSource {
    Button,
    Api,
}

impl fmt::Display for ResetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetSource::Button => write!(f, "button"),
            ResetSource::Api => write!(f, "api"),
        }
    }
}

/// Result of a reset as seen by the caller that triggered it.
#[derive(Debug, Clone, Copy)]
pub struct ResetOutcome {
    pub last_reset: DateTime<Utc>,
    /// False when the in-memory update succeeded but the disk write did
    /// not. The counter keeps running either way.
    pub durable: bool,
}

/// Shared application state: the timer plus everything a reset touches.
#[derive(Debug)]
pub struct AppState {
    pub timer: TimerState,
    store: StateStore,
    cue: Option<ResetCue>,
    /// Serializes saves so racing resets cannot rename their records onto
    /// disk in the opposite order of their accepted timestamps.
    save_lock: Mutex<()>,
}

impl AppState {
    pub fn new(seed: DateTime<Utc>, store: StateStore, cue: Option<ResetCue>) -> Self {
        Self {
            timer: TimerState::new(seed),
            store,
            cue,
            save_lock: Mutex::new(()),
        }
    }

    /// Current reset timestamp.
    pub fn last_reset(&self) -> DateTime<Utc> {
        self.timer.last_reset()
    }

    /// The single reset entry point shared by the button watcher and the
    /// HTTP API: update the timer, persist the new timestamp, dispatch the
    /// audio cue. Persistence and audio failures are absorbed here; the
    /// in-memory timestamp is authoritative for the process lifetime.
    pub fn reset(&self, source: ResetSource) -> ResetOutcome {
        let last_reset = self.timer.reset_now();

        // One save at a time, and each save re-reads the timer under the
        // lock, so the last rename to land always carries the
        // later-accepted timestamp.
        let durable = {
            let _guard = match self.save_lock.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            self.store.save_logged(self.timer.last_reset())
        };

        if durable {
            info!("Counter reset via {} at {}", source, last_reset);
        } else {
            warn!(
                "Counter reset via {} at {} (in-memory only, persistence failed)",
                source, last_reset
            );
        }

        if let Some(cue) = &self.cue {
            cue.dispatch();
        }

        ResetOutcome {
            last_reset,
            durable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state_with_store(dir: &tempfile::TempDir) -> AppState {
        let store = StateStore::new(dir.path().join("last_reset.json"));
        let seed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        AppState::new(seed, store, None)
    }

    #[tokio::test]
    async fn reset_updates_timer_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_store(&dir);

        let outcome = state.reset(ResetSource::Api);
        assert!(outcome.durable);
        assert_eq!(state.last_reset(), outcome.last_reset);

        // The record on disk matches what callers were told.
        let reloaded = StateStore::new(dir.path().join("last_reset.json")).load();
        assert_eq!(reloaded, outcome.last_reset);
    }

    #[tokio::test]
    async fn reset_survives_persistence_failure() {
        // Point the store at a path whose parent cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = StateStore::new(blocker.join("last_reset.json"));
        let state = AppState::new(Utc::now(), store, None);

        let before = state.last_reset();
        let outcome = state.reset(ResetSource::Button);
        assert!(!outcome.durable);
        assert!(outcome.last_reset >= before);
        assert_eq!(state.last_reset(), outcome.last_reset);
    }

    #[test]
    fn concurrent_resets_persist_the_later_accepted_timestamp() {
        use std::sync::{Arc, Barrier};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_reset.json");
        let state = Arc::new(AppState::new(Utc::now(), StateStore::new(&path), None));

        for round in 0..100 {
            let barrier = Arc::new(Barrier::new(4));
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let state = Arc::clone(&state);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        let source = if i % 2 == 0 {
                            ResetSource::Button
                        } else {
                            ResetSource::Api
                        };
                        state.reset(source);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            // Whatever save landed last must carry the winning timestamp.
            let on_disk = StateStore::new(&path).load();
            assert_eq!(
                on_disk,
                state.last_reset(),
                "disk diverged from memory on round {}",
                round
            );
        }
    }

    #[tokio::test]
    async fn sequential_resets_move_forward() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with_store(&dir);

        let first = state.reset(ResetSource::Button);
        let second = state.reset(ResetSource::Api);
        assert!(second.last_reset >= first.last_reset);
        assert_eq!(state.last_reset(), second.last_reset);
    }
}
