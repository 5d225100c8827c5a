//! Input source contract
//!
//! The button is a single boolean level sampled on a fixed interval,
//! active-low: `false` means the line is pulled to ground (pressed),
//! `true` means idle. A source that cannot be opened or read is a
//! recoverable condition; the appliance degrades to display-only mode.

pub mod gpio;

pub use gpio::GpioLine;

/// One boolean level per poll.
pub trait InputSource: Send {
    /// Sample the current line level. `true` = high (idle),
    /// `false` = low (pressed).
    fn sample(&mut self) -> anyhow::Result<bool>;
}
