//! State management module
//!
//! The shared timer state and the single reset entry point that both
//! writers (button watcher and HTTP API) go through.

pub mod app_state;
pub mod timer_state;

pub use app_state::{AppState, ResetOutcome, ResetSource};
pub use timer_state::TimerState;
