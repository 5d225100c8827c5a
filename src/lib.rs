//! DNS Counter - an always-on appliance tracking time since the last DNS failure
//!
//! One shared timestamp, written by the physical reset button and the
//! HTTP API, read once a second by the display loop, and persisted
//! atomically so the count survives restarts and power loss.

pub mod api;
pub mod config;
pub mod display;
pub mod input;
pub mod services;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use storage::StateStore;
pub use utils::signals::shutdown_signal;
