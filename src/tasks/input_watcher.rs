//! Button sampling background task

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, Instant};
use tracing::{debug, error, info};

use crate::input::InputSource;
use crate::state::{AppState, ResetSource};

/// Minimum spacing between two accepted button presses. Presses landing
/// inside the window are dropped, not queued.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Accept the press if the window has elapsed since the last one.
    pub fn accept(&mut self) -> bool {
        let now = Instant::now();
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

/// Timing knobs for the sampling loop.
#[derive(Debug, Clone, Copy)]
pub struct WatcherTiming {
    pub sample_interval: Duration,
    pub debounce_window: Duration,
}

/// Poll the button line until shutdown, resetting the counter on each
/// debounced press.
///
/// The level is edge-detected: a press fires once on the high-to-low
/// transition, not on every sample while the button is held. A sampling
/// error disables the watcher for the process lifetime (the appliance
/// keeps running display-only), matching the recoverable-degradation
/// contract of the input source.
///
/// Returns the number of accepted presses, for the shutdown log line.
pub async fn input_watcher_task<S: InputSource>(
    state: Arc<AppState>,
    mut source: S,
    timing: WatcherTiming,
    mut shutdown: watch::Receiver<bool>,
) -> u64 {
    info!(
        "Button monitoring started (sampling every {:?}, {:?} debounce)",
        timing.sample_interval, timing.debounce_window
    );

    let mut ticker = interval(timing.sample_interval);
    let mut debounce = Debounce::new(timing.debounce_window);
    let mut last_level: Option<bool> = None;
    let mut accepted: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let level = match source.sample() {
                    Ok(level) => level,
                    Err(e) => {
                        error!(
                            "Button input failed: {:#}. Disabling button watcher, \
                             continuing in display-only mode",
                            e
                        );
                        break;
                    }
                };

                if last_level == Some(level) {
                    continue;
                }
                debug!("Button level changed to {}", level as u8);
                last_level = Some(level);

                // Active low: a falling edge is a press.
                if !level && debounce.accept() {
                    info!("Button press detected, resetting counter");
                    state.reset(ResetSource::Button);
                    accepted += 1;
                }
            }
            _ = shutdown.changed() => {
                debug!("Button watcher received shutdown");
                break;
            }
        }
    }

    info!("Button watcher stopped after {} resets", accepted);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StateStore;
    use chrono::{TimeZone, Utc};
    use std::collections::VecDeque;

    struct ScriptedSource(VecDeque<bool>);

    impl InputSource for ScriptedSource {
        fn sample(&mut self) -> anyhow::Result<bool> {
            self.0
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"))
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let store = StateStore::new(dir.path().join("last_reset.json"));
        let seed = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Arc::new(AppState::new(seed, store, None))
    }

    fn timing() -> WatcherTiming {
        WatcherTiming {
            sample_interval: Duration::from_millis(100),
            debounce_window: Duration::from_millis(300),
        }
    }

    async fn run_script(samples: &[bool]) -> (u64, Arc<AppState>) {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let source = ScriptedSource(samples.iter().copied().collect());
        let (_tx, rx) = watch::channel(false);
        let accepted =
            input_watcher_task(Arc::clone(&state), source, timing(), rx).await;
        (accepted, state)
    }

    #[tokio::test(start_paused = true)]
    async fn presses_inside_debounce_window_are_dropped() {
        // Falling edges at t=100ms and t=300ms: 200ms apart, one accept.
        let (accepted, state) = run_script(&[true, false, true, false, true]).await;
        assert_eq!(accepted, 1);
        assert!(state.last_reset() > Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn presses_past_the_window_are_each_accepted() {
        // Falling edges at t=100ms and t=600ms: 500ms apart, both accepted.
        let (accepted, _) =
            run_script(&[true, false, true, true, true, true, false]).await;
        assert_eq!(accepted, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn held_button_fires_once() {
        let (accepted, _) = run_script(&[true, false, false, false, false]).await;
        assert_eq!(accepted, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_line_never_resets() {
        let (accepted, state) = run_script(&[true, true, true, true]).await;
        assert_eq!(accepted, 0);
        assert_eq!(
            state.last_reset(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_watcher() {
        struct IdleSource;
        impl InputSource for IdleSource {
            fn sample(&mut self) -> anyhow::Result<bool> {
                Ok(true)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(input_watcher_task(state, IdleSource, timing(), rx));

        tokio::time::sleep(Duration::from_millis(250)).await;
        tx.send(true).unwrap();
        let accepted = handle.await.unwrap();
        assert_eq!(accepted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_standalone_behavior() {
        let mut debounce = Debounce::new(Duration::from_millis(300));
        assert!(debounce.accept());
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(!debounce.accept());
        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(debounce.accept());
    }
}
