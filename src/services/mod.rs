//! External side effects invoked alongside state changes

pub mod audio;

pub use audio::ResetCue;
