//! User configuration file handling
//!
//! Manages settings from ~/.config/meshtext/settings.json

use super::settings::LayoutSettings;
use crate::layout::{HAlign, VAlign};
use crate::logging;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration from ~/.config/meshtext/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    pub h_align: Option<HAlign>,
    pub v_align: Option<VAlign>,
    pub kerning: Option<f32>,
    pub font_size: Option<f32>,
    pub flatten_tolerance: Option<f64>,
}

impl ConfigFile {
    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        logging::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file holding every built-in default
    pub fn with_defaults() -> Self {
        let defaults = LayoutSettings::default();
        Self {
            h_align: Some(defaults.h_align),
            v_align: Some(defaults.v_align),
            kerning: Some(defaults.kerning),
            font_size: Some(defaults.font_size),
            flatten_tolerance: Some(defaults.flatten_tolerance),
        }
    }

    /// Layer this file over `base`, keeping base values it leaves unset
    pub fn apply(&self, base: LayoutSettings) -> LayoutSettings {
        LayoutSettings {
            h_align: self.h_align.unwrap_or(base.h_align),
            v_align: self.v_align.unwrap_or(base.v_align),
            kerning: self.kerning.unwrap_or(base.kerning),
            font_size: self.font_size.unwrap_or(base.font_size),
            flatten_tolerance: self.flatten_tolerance.unwrap_or(base.flatten_tolerance),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/meshtext directory structure
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = logging::config_dir();

        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = logging::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::with_defaults().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit layout defaults at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let config = ConfigFile {
            h_align: Some(HAlign::Right),
            font_size: Some(24.0),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(ConfigFile::load_from(&path), Some(config));
    }

    #[test]
    fn unreadable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(ConfigFile::load_from(&path), None);
        assert_eq!(ConfigFile::load_from(&dir.path().join("missing.json")), None);
    }

    #[test]
    fn unset_fields_keep_the_base() {
        let config = ConfigFile {
            v_align: Some(VAlign::Bottom),
            kerning: Some(12.0),
            ..Default::default()
        };
        let settings = config.apply(LayoutSettings::default());
        assert_eq!(settings.v_align, VAlign::Bottom);
        assert_eq!(settings.kerning, 12.0);
        assert_eq!(settings.h_align, HAlign::Left);
        assert_eq!(settings.font_size, LayoutSettings::default().font_size);
    }
}
