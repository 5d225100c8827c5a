//! Display refresh background task

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::display::{DisplaySink, Frame};
use crate::state::AppState;
use crate::utils::format_duration;

/// Redraw the counter once per tick until shutdown.
///
/// Each tick reads the shared timer, formats the elapsed time, and pushes
/// a frame to the sink. A failed draw is logged and retried on the next
/// tick; a single bad frame never stops the loop. On shutdown the loop
/// exits within one tick, blanks the display, and drops the sink handle.
pub async fn render_loop_task<D: DisplaySink>(
    state: Arc<AppState>,
    mut display: D,
    refresh: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Display loop started (refresh every {:?})", refresh);

    let mut ticker = interval(refresh);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = (Utc::now() - state.last_reset())
                    .to_std()
                    .unwrap_or_default();
                let (line1, line2) = format_duration(elapsed);
                let frame = Frame::counter(line1, line2);

                if let Err(e) = display.draw(&frame) {
                    warn!("Display write failed, retrying next tick: {:#}", e);
                }
            }
            _ = shutdown.changed() => {
                debug!("Display loop received shutdown");
                break;
            }
        }
    }

    if let Err(e) = display.clear() {
        warn!("Failed to clear display at shutdown: {:#}", e);
    }
    info!("Display loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StateStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct SinkLog {
        frames: Vec<Frame>,
        cleared: bool,
        fail_draws: usize,
    }

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<SinkLog>>);

    impl DisplaySink for RecordingSink {
        fn draw(&mut self, frame: &Frame) -> anyhow::Result<()> {
            let mut log = self.0.lock().unwrap();
            if log.fail_draws > 0 {
                log.fail_draws -= 1;
                anyhow::bail!("panel offline");
            }
            log.frames.push(frame.clone());
            Ok(())
        }

        fn clear(&mut self) -> anyhow::Result<()> {
            self.0.lock().unwrap().cleared = true;
            Ok(())
        }
    }

    fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
        let store = StateStore::new(dir.path().join("last_reset.json"));
        Arc::new(AppState::new(Utc::now(), store, None))
    }

    #[tokio::test(start_paused = true)]
    async fn draws_frames_and_clears_on_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let sink = RecordingSink::default();
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(render_loop_task(
            state,
            sink.clone(),
            Duration::from_secs(1),
            rx,
        ));
        tokio::time::sleep(Duration::from_secs(3)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let log = sink.0.lock().unwrap();
        assert!(log.frames.len() >= 3);
        assert!(log.cleared);
        assert_eq!(log.frames[0].lines[0].text, "DAYS SINCE");
        assert_eq!(log.frames[0].lines[1].text, "DNS");
        // Freshly reset counter shows a near-zero elapsed time.
        assert_eq!(log.frames[0].lines[2].text, "00y 00mo 00d");
    }

    #[tokio::test(start_paused = true)]
    async fn draw_failure_is_retried_next_tick() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        let sink = RecordingSink::default();
        sink.0.lock().unwrap().fail_draws = 2;
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(render_loop_task(
            state,
            sink.clone(),
            Duration::from_secs(1),
            rx,
        ));
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        let log = sink.0.lock().unwrap();
        assert!(!log.frames.is_empty());
        assert!(log.cleared);
    }
}
