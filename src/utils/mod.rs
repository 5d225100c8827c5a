//! Utility functions module

pub mod format;
pub mod signals;

pub use format::format_duration;
pub use signals::shutdown_signal;
