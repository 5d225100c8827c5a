//! GPIO button line read through the sysfs value file

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;

use super::InputSource;

/// Button line sampled from a sysfs-style value file
/// (`/sys/class/gpio/gpio{pin}/value`). The line is expected to carry a
/// pull-up, so it reads `1` idle and `0` while the button is held.
#[derive(Debug)]
pub struct GpioLine {
    path: PathBuf,
}

impl GpioLine {
    /// Path for a pin number under the standard sysfs layout.
    pub fn value_path(pin: u32) -> PathBuf {
        PathBuf::from(format!("/sys/class/gpio/gpio{}/value", pin))
    }

    /// Open the line, verifying it is readable up front so a missing or
    /// permission-restricted device is reported once at startup.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let mut line = Self { path };
        let level = line
            .sample()
            .with_context(|| format!("cannot read GPIO line {}", line.path.display()))?;
        info!(
            "GPIO line {} opened, initial level {}",
            line.path.display(),
            level as u8
        );
        Ok(line)
    }
}

impl InputSource for GpioLine {
    fn sample(&mut self) -> anyhow::Result<bool> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        match raw.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => bail!("unexpected GPIO value {:?} in {}", other, self.path.display()),
        }
    }
}
