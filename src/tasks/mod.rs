//! Background tasks module
//!
//! The two long-lived loops that run alongside the HTTP server: button
//! sampling and display refresh.

pub mod input_watcher;
pub mod render_loop;

pub use input_watcher::{input_watcher_task, Debounce, WatcherTiming};
pub use render_loop::render_loop_task;
