//! Application configuration management
//!
//! This module handles all configuration aspects:
//! - User configuration files
//! - Built-in layout defaults

pub mod settings;
pub mod user_config;

// Simple, clear re-exports
pub use settings::{LayoutSettings, DEFAULT_FONT_SIZE, DEFAULT_TEXT};
pub use user_config::ConfigFile;
