//! TysonTerm - a GUI terminal front-end for the TysonLang interpreter
//!
//! This library provides everything the `tysonterm` window needs except the
//! window itself: a simulated terminal that captures keystrokes, echoes
//! commands, answers a few built-ins and animates interpreter output one
//! character at a time.
//!
//! ## Module Organization
//!
//! - [`terminal`] - line buffer, keypress handling, command dispatch,
//!   typewriter animation and the startup sequence
//! - [`interpreter`] - the interpreter bridge traits and the PTY-backed
//!   implementation
//! - [`config`] - configuration loading and defaults
//! - [`ui`] - egui widgets for the terminal pane and the scratchpad
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use tysonterm::terminal::CommandDispatcher;
//!
//! # async fn demo() {
//! let mut dispatcher = CommandDispatcher::new("std.tyson");
//! let response = dispatcher.dispatch("help").await;
//! println!("{}", response);
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Main Thread:** runs the `egui` UI loop and owns the terminal view
//! - **Async Loop:** a tokio task that owns the interpreter session and the
//!   typewriter, fed by an unbounded request channel
//! - **PTY Reader Thread:** reads interpreter output (blocking I/O)

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod interpreter;
pub mod terminal;

// UI modules
pub mod ui;

// Re-exports for core functionality
pub use config::{Config, RuntimeConfig};
pub use error::{Error, Result};
pub use interpreter::{EvalFault, InterpreterModule, InterpreterSession, PtyInterpreter};
pub use terminal::{CommandDispatcher, TerminalView, Typewriter};

// Convenience re-exports for common types
pub use config::loader::ConfigLoader;

// Version information
/// The current version of TysonTerm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default search paths.
///
/// A missing or invalid file is logged and replaced by the built-in defaults.
pub fn init() -> RuntimeConfig {
    info!("Initializing {} v{}", NAME, VERSION);

    match RuntimeConfig::new() {
        Ok(config) => {
            debug!("Configuration loaded from default locations");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            RuntimeConfig::with_defaults()
        }
    }
}

/// Load configuration from a specific file
pub fn init_with_config(config_path: &std::path::Path) -> Result<RuntimeConfig> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    let runtime_config = RuntimeConfig::load_from_file(config_path).map_err(|e| {
        error!(
            "Failed to load configuration from {}: {}",
            config_path.display(),
            e
        );
        e
    })?;

    info!("Configuration loaded from: {}", config_path.display());
    Ok(runtime_config)
}

/// Turn a startup error into a message with remediation hints
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::InterpreterSpawnFailed { command, reason } => {
            format!(
                "Interpreter Error: Could not start '{}': {}\n\nTry:\n• Check that the interpreter is installed and on PATH\n• Set [interpreter] command in the configuration\n• Pass --interpreter <CMD>",
                command, reason
            )
        }
        Error::InterpreterStartupTimeout { command, waited } => {
            format!(
                "Interpreter Error: '{}' showed no prompt within {:?}\n\nTry:\n• Check [interpreter] prompt matches the interpreter's prompt\n• Raise [interpreter] startup_timeout_ms",
                command, waited
            )
        }
        Error::InterpreterExited { command } => {
            format!(
                "Interpreter Error: '{}' exited during startup\n\nTry:\n• Run the interpreter by hand to see its output\n• Check [interpreter] args",
                command
            )
        }
        Error::ConfigParseFailed { format, reason } => {
            format!(
                "Configuration Error: Failed to parse {} config: {}\n\nTry:\n• Check configuration file syntax\n• Use default configuration",
                format, reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check configuration value\n• Use default configuration",
                field, reason
            )
        }
        Error::ConfigNotFound => {
            "Configuration Error: Config file not found\n\nTry:\n• Create a configuration file\n• Use default configuration".to_string()
        }
        _ => {
            format!(
                "Unexpected Error: {}\n\nPlease report this issue with debug logs enabled",
                error
            )
        }
    }
}
