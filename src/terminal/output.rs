//! Terminal output log
//!
//! Ordered record of echoed commands and their responses. Entries are only
//! ever appended; the response currently being animated grows character by
//! character until the next echo starts a new entry.

use chrono::{DateTime, Utc};

/// What produced a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `> command` line written when Enter is pressed
    Echo,
    /// Text returned by the dispatcher
    Response,
}

/// One entry of the output log
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub kind: EntryKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    fn new(kind: EntryKind, text: String) -> Self {
        Self {
            kind,
            text,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only output log
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the echo line for a submitted command
    pub fn push_echo(&mut self, command: &str) {
        self.entries
            .push(LogEntry::new(EntryKind::Echo, format!("> {}", command)));
    }

    /// Append one character to the current response
    pub fn append_response_char(&mut self, ch: char) {
        self.current_response().push(ch);
    }

    /// Append text to the current response in one step
    pub fn append_response_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.current_response().push_str(text);
        }
    }

    fn current_response(&mut self) -> &mut String {
        let needs_entry = !matches!(
            self.entries.last(),
            Some(LogEntry {
                kind: EntryKind::Response,
                ..
            })
        );
        if needs_entry {
            self.entries
                .push(LogEntry::new(EntryKind::Response, String::new()));
        }
        let last = self.entries.len() - 1;
        &mut self.entries[last].text
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full log text, one entry per line
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
