//! Configuration File Loading
//!
//! Finds and loads configuration files from various locations with support
//! for multiple formats and fallback to defaults.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files (without extension)
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Determine the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader using the default search paths
    pub fn new() -> Self {
        Self::with_search_paths(Self::get_search_paths())
    }

    /// Create a loader that only looks in the given locations
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
        }
    }

    /// Load configuration from the search paths, or defaults when none exists
    pub fn load() -> Result<Config> {
        Self::new().load_or_default()
    }

    /// Load from this loader's search paths, falling back to defaults
    pub fn load_or_default(&self) -> Result<Config> {
        if let Some((path, config)) = self.find_and_load_config() {
            info!("Configuration loaded from {}", path.display());
            return Ok(config);
        }

        debug!("No configuration file found, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        Ok(config)
    }

    /// Load and validate a specific configuration file
    pub fn load_from_path(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(Error::ConfigNotFound);
        }
        let config = load_config_file(path, ConfigFormat::from_path(path))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Option<(PathBuf, Config)> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = path.join("config").with_extension(format.extension());

                if !config_path.exists() {
                    continue;
                }

                match load_config_file(&config_path, *format)
                    .and_then(|config| validate_config(&config).map(|_| config))
                {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => {
                        // Keep searching
                        warn!(
                            "Failed to load config from {}: {}",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }

        None
    }

    /// Get default search paths for configuration directories
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tysonterm"));
        }

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("tysonterm"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tysonterm"));
            paths.push(home.join(".config").join("tysonterm"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".tysonterm"));
        }

        paths
    }

}

/// Load a specific configuration file
fn load_config_file(path: &Path, format: ConfigFormat) -> Result<Config> {
    let content = fs::read_to_string(path)?;

    match format {
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason: e.to_string(),
        }),
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.ui.font_size <= 0.0 || config.ui.font_size > 72.0 {
        return Err(Error::ConfigValidationFailed {
            field: "ui.font_size".to_string(),
            reason: "Font size must be between 0 and 72".to_string(),
        });
    }

    if config.ui.cursor.is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "ui.cursor".to_string(),
            reason: "Cursor glyph cannot be empty".to_string(),
        });
    }

    if config.ui.cursor_blink_ms == 0 {
        return Err(Error::ConfigValidationFailed {
            field: "ui.cursor_blink_ms".to_string(),
            reason: "Blink period must be greater than 0".to_string(),
        });
    }

    if config.interpreter.command.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "interpreter.command".to_string(),
            reason: "Interpreter command cannot be empty".to_string(),
        });
    }

    if config.interpreter.prompt.is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "interpreter.prompt".to_string(),
            reason: "Interpreter prompt cannot be empty".to_string(),
        });
    }

    if config.interpreter.std_file.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "interpreter.std_file".to_string(),
            reason: "Standard library file name cannot be empty".to_string(),
        });
    }

    Ok(())
}
