//! Configuration module for ControlFast
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ControlFastPaths;
pub use settings::Settings;
