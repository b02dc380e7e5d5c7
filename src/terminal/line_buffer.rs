//! Command line buffer
//!
//! Holds the command being typed and the cursor marker drawn after it. The
//! marker lives outside the text: every edit detaches it, changes the text and
//! re-attaches it, so the captured command can never contain the marker even
//! when the user types the marker glyph itself.

/// Cursor marker drawn at the end of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMarker {
    glyph: String,
    attached: bool,
}

impl CursorMarker {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            attached: true,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn attach(&mut self) {
        self.attached = true;
    }
}

/// The in-progress command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: CursorMarker,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new("_")
    }
}

impl LineBuffer {
    /// Create an empty buffer with the given cursor glyph
    pub fn new(cursor_glyph: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            cursor: CursorMarker::new(cursor_glyph),
        }
    }

    /// Text typed so far, without the cursor marker
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> &CursorMarker {
        &self.cursor
    }

    /// Append one character
    pub fn push(&mut self, ch: char) {
        self.edit(|text| text.push(ch));
    }

    /// Remove the last character; returns false on an empty buffer
    pub fn backspace(&mut self) -> bool {
        self.edit(|text| text.pop().is_some())
    }

    /// Capture the trimmed command and reset the buffer
    pub fn take_command(&mut self) -> String {
        self.edit(|text| {
            let command = text.trim().to_string();
            text.clear();
            command
        })
    }

    /// Text followed by the cursor glyph, as drawn on screen
    pub fn rendered(&self, cursor_visible: bool) -> String {
        let mut out = self.text.clone();
        if cursor_visible && self.cursor.is_attached() {
            out.push_str(self.cursor.glyph());
        }
        out
    }

    fn edit<R>(&mut self, f: impl FnOnce(&mut String) -> R) -> R {
        self.cursor.detach();
        let result = f(&mut self.text);
        self.cursor.attach();
        result
    }
}
