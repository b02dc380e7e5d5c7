//! ANSI escape code removal
//!
//! Interpreter output passes through a pseudoterminal, so line editors may
//! sprinkle it with escape sequences. The terminal surfaces render plain text,
//! so everything is stripped before the result reaches the dispatcher.

use crate::error::Result;
use regex::Regex;

/// Removes escape sequences and carriage returns from terminal output
#[derive(Debug, Clone)]
pub struct AnsiStripper {
    /// CSI, OSC and two-byte escape sequences
    escape_regex: Regex,
}

impl AnsiStripper {
    /// Create a new stripper
    pub fn new() -> Result<Self> {
        let escape_regex = Regex::new(
            r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]",
        )?;
        Ok(Self { escape_regex })
    }

    /// Strip escape sequences and `\r`, keeping other text untouched
    pub fn strip(&self, text: &str) -> String {
        self.escape_regex.replace_all(text, "").replace('\r', "")
    }
}
