//! Terminal-backed display sink
//!
//! Renders frames as ANSI-colored lines on stdout so the appliance runs on
//! any machine without matrix hardware attached.

use std::io::{self, Write};

use anyhow::Context;

use super::{DisplaySink, Frame, Rgb};

pub struct ConsoleDisplay {
    out: io::Stdout,
}

impl ConsoleDisplay {
    pub fn new() -> anyhow::Result<Self> {
        let out = io::stdout();
        // Reserve the four frame rows so the first repaint has something
        // to move up over.
        write!(out.lock(), "\n\n\n\n").context("failed to acquire stdout")?;
        Ok(Self { out })
    }
}

fn colored(text: &str, Rgb(r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text)
}

impl DisplaySink for ConsoleDisplay {
    fn draw(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        // Repaint in place: move the cursor up over the previous frame.
        write!(out, "\x1b[4A\x1b[J").ok();
        for line in &frame.lines {
            let centered = format!("{:^13}", line.text);
            writeln!(out, "{}", colored(&centered, line.color))
                .context("failed to write frame line")?;
        }
        out.flush().context("failed to flush display")?;
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        write!(out, "\x1b[4A\x1b[J").ok();
        out.flush().context("failed to clear display")?;
        Ok(())
    }
}
