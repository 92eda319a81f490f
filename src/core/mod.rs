//! Core application functionality
//!
//! This module contains the binary's surface:
//! - CLI argument parsing and validation
//! - Settings and user configuration
//! - Error reporting
//! - The runner that meshes and lays out text

pub mod cli;
pub mod config;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config::{ConfigFile, LayoutSettings};
pub use runner::{glyph_run, mesh_text, run_app, GlyphRun, MeshReport};
