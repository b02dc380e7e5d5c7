//! Configuration management for TysonTerm
//!
//! This module provides configuration loading/saving and the runtime
//! configuration handle shared by the window, the typewriter and the
//! interpreter bridge.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

/// ASCII art shown (and animated) when the terminal starts
pub const DEFAULT_BANNER: &str = r#"
 _____                       _
|_   _|   _ ___  ___  _ __  | |    __ _ _ __   __ _
  | || | | / __|/ _ \| '_ \ | |   / _` | '_ \ / _` |
  | || |_| \__ \ (_) | | | || |__| (_| | | | | (_| |
  |_| \__, |___/\___/|_| |_||_____\__,_|_| |_|\__, |
      |___/                                   |___/
"#;

/// Instructions line animated after the banner
pub const DEFAULT_INSTRUCTIONS: &str = "Enter a command. Type 'help' for options.";

/// Main configuration structure for TysonTerm
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI configuration
    pub ui: UiConfig,

    /// Output animation configuration
    pub typewriter: TypewriterConfig,

    /// Interpreter bridge configuration
    pub interpreter: InterpreterConfig,
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Font size in points for all terminal text
    pub font_size: f32,

    /// Banner text animated at startup
    pub banner: String,

    /// Instructions text animated after the banner
    pub instructions: String,

    /// Prompt drawn in front of the command line
    pub prompt: String,

    /// Glyph drawn as the terminal cursor
    pub cursor: String,

    /// Cursor blink half-period in milliseconds
    pub cursor_blink_ms: u64,

    /// Show the scratchpad side panel
    pub show_scratchpad: bool,

    /// Terminal colors
    pub colors: ColorConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            banner: DEFAULT_BANNER.trim_matches('\n').to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            prompt: "$ ".to_string(),
            cursor: "_".to_string(),
            cursor_blink_ms: 530,
            show_scratchpad: true,
            colors: ColorConfig::default(),
        }
    }
}

/// RGB colors used by the terminal surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: [u8; 3],
    pub foreground: [u8; 3],
    pub banner: [u8; 3],
    pub prompt: [u8; 3],
    pub echo: [u8; 3],
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: [12, 12, 18],
            foreground: [210, 210, 210],
            banner: [120, 230, 120],
            prompt: [120, 230, 120],
            echo: [255, 255, 255],
        }
    }
}

/// Typewriter animation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Delay between consecutive characters in milliseconds
    pub char_delay_ms: u64,

    /// Pause before the banner and before the instructions
    pub startup_pause_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: 5,
            startup_pause_ms: 500,
        }
    }
}

impl TypewriterConfig {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn startup_pause(&self) -> Duration {
        Duration::from_millis(self.startup_pause_ms)
    }
}

/// Interpreter bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Interpreter executable
    pub command: String,

    /// Arguments passed to the interpreter
    pub args: Vec<String>,

    /// Prompt the interpreter prints when it is ready for input
    pub prompt: String,

    /// Directory holding bundled resources such as the standard library
    pub library_dir: Option<PathBuf>,

    /// Standard library file printed by the `std` command
    pub std_file: String,

    /// How long to wait for the first prompt
    pub startup_timeout_ms: u64,

    /// Extra environment variables for the interpreter process
    pub environment: HashMap<String, String>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            command: "tysonlang".to_string(),
            args: Vec::new(),
            prompt: "TysonLang> ".to_string(),
            library_dir: None,
            std_file: "std.tyson".to_string(),
            startup_timeout_ms: 5000,
            environment: HashMap::new(),
        }
    }
}

impl InterpreterConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    /// Directory resources are resolved against
    pub fn resolved_library_dir(&self) -> PathBuf {
        self.library_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Runtime configuration handle
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Current configuration
    config: Config,
}

impl RuntimeConfig {
    /// Load configuration from the default search paths, falling back to defaults
    pub fn new() -> Result<Self> {
        let config = loader::ConfigLoader::load()?;
        Ok(Self { config })
    }

    /// Configuration built entirely from defaults
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = loader::ConfigLoader::load_from_path(path)?;
        Ok(Self { config })
    }

    /// Get current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
