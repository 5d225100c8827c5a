//! Display sink contract
//!
//! The core hands the sink four pre-formatted text lines with colors and a
//! draw call; pixel layout, fonts, and panel driving belong to the sink
//! implementation.

pub mod console;

pub use console::ConsoleDisplay;

/// 8-bit RGB color for a display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const RED: Rgb = Rgb(255, 0, 0);

/// One text line of a frame with its color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: Rgb,
}

impl Line {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A complete counter frame: two header lines and two time lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: [Line; 4],
}

impl Frame {
    /// Build the standard counter frame from the two formatted time lines.
    pub fn counter(time_line1: impl Into<String>, time_line2: impl Into<String>) -> Self {
        Self {
            lines: [
                Line::new("DAYS SINCE", WHITE),
                Line::new("DNS", WHITE),
                Line::new(time_line1, RED),
                Line::new(time_line2, RED),
            ],
        }
    }
}

/// Something that can render a frame and be blanked at shutdown.
///
/// Implementations own their hardware handle exclusively for the process
/// lifetime; acquisition failure at construction is the one fatal error in
/// the appliance.
pub trait DisplaySink: Send {
    /// Draw a frame, replacing whatever was shown before.
    fn draw(&mut self, frame: &Frame) -> anyhow::Result<()>;

    /// Blank the display. Called once at shutdown.
    fn clear(&mut self) -> anyhow::Result<()>;
}
