//! Audio side effect played on every counter reset

use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, error};

/// Fire-and-forget `aplay` invocation for the reset notification sound.
///
/// Playback runs as a detached task with every failure swallowed into the
/// log, so a missing sound card or media file can never block or fail the
/// reset path.
#[derive(Debug, Clone)]
pub struct ResetCue {
    media: PathBuf,
    device: Option<String>,
}

impl ResetCue {
    pub fn new(media: PathBuf, device: Option<String>) -> Self {
        Self { media, device }
    }

    /// Dispatch playback without waiting for it.
    pub fn dispatch(&self) {
        let cue = self.clone();
        tokio::spawn(async move {
            cue.play().await;
        });
    }

    async fn play(&self) {
        debug!("Playing reset cue {}", self.media.display());

        let mut cmd = Command::new("aplay");
        if let Some(device) = &self.device {
            cmd.arg("-D").arg(device);
        }
        cmd.arg(&self.media);
        // aplay refuses to start without a writable runtime dir when run
        // as a system service.
        cmd.env("HOME", "/tmp").env("XDG_RUNTIME_DIR", "/tmp");

        match cmd.output().await {
            Ok(output) if output.status.success() => {
                debug!("Reset cue playback completed");
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                error!("Audio playback failed: {}", stderr.trim());
            }
            Err(e) => {
                error!("Failed to launch aplay: {}", e);
            }
        }
    }
}
