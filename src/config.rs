//! Configuration and CLI argument handling

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "dns-counter")]
#[command(about = "Displays time elapsed since the last DNS failure")]
#[command(version)]
pub struct Config {
    /// Port to bind the API server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Disable the HTTP API entirely
    #[arg(long)]
    pub no_api: bool,

    /// Path of the persisted last-reset record
    #[arg(long, default_value = "/usr/local/share/dnsfail/last_reset.json")]
    pub persistence_file: PathBuf,

    /// GPIO pin the reset button is wired to (active low, pull-up)
    #[arg(long, default_value = "19")]
    pub button_pin: u32,

    /// Override the button value file (defaults to the sysfs path for
    /// --button-pin)
    #[arg(long)]
    pub button_device: Option<PathBuf>,

    /// Button sampling interval in milliseconds
    #[arg(long, default_value = "100")]
    pub sample_interval_ms: u64,

    /// Debounce window between accepted presses, in milliseconds
    #[arg(long, default_value = "300")]
    pub debounce_ms: u64,

    /// Display refresh interval in seconds
    #[arg(long, default_value = "1")]
    pub refresh_secs: u64,

    /// Sound played on every reset
    #[arg(long, default_value = "/usr/local/share/dnsfail/media/fail.wav")]
    pub audio_file: PathBuf,

    /// ALSA device passed to aplay (default device when omitted)
    #[arg(long)]
    pub audio_device: Option<String>,

    /// Disable the audio cue
    #[arg(long)]
    pub no_audio: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Path of the button value file, honoring the override
    pub fn button_value_path(&self) -> PathBuf {
        self.button_device
            .clone()
            .unwrap_or_else(|| crate::input::GpioLine::value_path(self.button_pin))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}
