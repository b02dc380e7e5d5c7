//! Error types and Result aliases for TysonTerm

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for TysonTerm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for TysonTerm
#[derive(Debug)]
pub enum Error {
    // === Interpreter bridge errors ===
    /// Failed to create the PTY hosting the interpreter
    PtyCreationFailed {
        command: String,
        reason: String,
    },

    /// Failed to spawn the interpreter executable
    InterpreterSpawnFailed {
        command: String,
        reason: String,
    },

    /// Failed to clone PTY reader
    PtyReaderCloneFailed {
        reason: String,
    },

    /// Failed to take PTY writer
    PtyWriterTakeFailed {
        reason: String,
    },

    /// Interpreter never printed its prompt during startup
    InterpreterStartupTimeout {
        command: String,
        waited: Duration,
    },

    /// Interpreter exited before it became ready
    InterpreterExited {
        command: String,
    },

    /// Failed to read a bundled interpreter resource
    ResourceReadFailed {
        path: PathBuf,
        reason: String,
    },

    // === Configuration errors ===
    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    /// Regex compilation errors
    Regex(regex::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Interpreter errors
            Error::PtyCreationFailed { command, reason } => {
                write!(f, "Failed to create PTY for interpreter '{}': {}", command, reason)
            }
            Error::InterpreterSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn interpreter '{}': {}", command, reason)
            }
            Error::PtyReaderCloneFailed { reason } => {
                write!(f, "Failed to clone PTY reader: {}", reason)
            }
            Error::PtyWriterTakeFailed { reason } => {
                write!(f, "Failed to take PTY writer: {}", reason)
            }
            Error::InterpreterStartupTimeout { command, waited } => {
                write!(
                    f,
                    "Interpreter '{}' printed no prompt within {:?}",
                    command, waited
                )
            }
            Error::InterpreterExited { command } => {
                write!(f, "Interpreter '{}' exited during startup", command)
            }
            Error::ResourceReadFailed { path, reason } => {
                write!(f, "Failed to read '{}': {}", path.display(), reason)
            }

            // Configuration errors
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
            Error::Regex(err) => write!(f, "Regex compilation error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Regex(err)
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
