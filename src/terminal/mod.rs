//! Terminal emulation core
//!
//! Everything the simulated terminal does, independent of how it is drawn:
//!
//! - [`line_buffer`] - the command line and its cursor marker
//! - [`keypress`] - translating key events into line edits
//! - [`dispatch`] - built-in commands and interpreter calls
//! - [`typewriter`] - character-by-character output animation
//! - [`bootstrap`] - the startup sequence
//! - [`output`] - the output log
//!
//! [`TerminalView`] is the UI state all of these operate on. It is owned by
//! the window and passed explicitly to the handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub mod bootstrap;
pub mod dispatch;
pub mod keypress;
pub mod line_buffer;
pub mod output;
pub mod typewriter;

pub use dispatch::{CommandDispatcher, ScreenEffect};
pub use keypress::{handle_keypress, FocusState, Key, KeyInput, KeyOutcome, Modifiers};
pub use line_buffer::LineBuffer;
pub use output::{EntryKind, LogEntry, OutputLog};
pub use typewriter::{CancelToken, OutputSink, Typewriter, WriteOutcome};

/// Count of screen clears, shared between the view and whoever produces
/// log output.
///
/// Log output is tagged with the count current when its command was
/// submitted. Output tagged before the latest clear belongs to commands the
/// clear already wiped and is dropped.
#[derive(Debug, Clone, Default)]
pub struct ClearEpoch(Arc<AtomicU64>);

impl ClearEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn advance(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Text areas the typewriter can write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Banner,
    Instructions,
    Log,
}

/// A block of text that can be hidden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    pub text: String,
    pub visible: bool,
}

impl Default for TextSurface {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: true,
        }
    }
}

/// UI state of the simulated terminal
#[derive(Debug, Clone)]
pub struct TerminalView {
    pub banner: TextSurface,
    pub instructions: TextSurface,
    pub log: OutputLog,
    pub line: LineBuffer,
    epoch: ClearEpoch,
    /// Cursor glyph shown (set once startup finishes)
    cursor_revealed: bool,
    /// Keyboard handling attached
    input_attached: bool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new("_")
    }
}

impl TerminalView {
    pub fn new(cursor_glyph: &str) -> Self {
        Self {
            banner: TextSurface::default(),
            instructions: TextSurface::default(),
            log: OutputLog::new(),
            line: LineBuffer::new(cursor_glyph),
            epoch: ClearEpoch::new(),
            cursor_revealed: false,
            input_attached: false,
        }
    }

    /// Append one character to a surface
    pub fn append(&mut self, surface: Surface, ch: char) {
        match surface {
            Surface::Banner => self.banner.text.push(ch),
            Surface::Instructions => self.instructions.text.push(ch),
            Surface::Log => self.log.append_response_char(ch),
        }
    }

    /// Append a run of text to a surface in one step
    pub fn append_str(&mut self, surface: Surface, text: &str) {
        match surface {
            Surface::Banner => self.banner.text.push_str(text),
            Surface::Instructions => self.instructions.text.push_str(text),
            Surface::Log => self.log.append_response_text(text),
        }
    }

    /// Append output produced for a command submitted at `epoch`.
    ///
    /// Log output from before the latest clear is dropped; returns whether
    /// the text was kept.
    pub fn append_output(&mut self, epoch: u64, surface: Surface, text: &str) -> bool {
        if surface == Surface::Log && epoch != self.epoch.current() {
            trace!("Dropping {} bytes of output cleared from the screen", text.len());
            return false;
        }
        self.append_str(surface, text);
        true
    }

    pub fn clear_epoch(&self) -> &ClearEpoch {
        &self.epoch
    }

    /// Apply a side effect requested by a built-in command
    pub fn apply_effect(&mut self, effect: ScreenEffect) {
        match effect {
            ScreenEffect::Clear => self.clear_screen(),
        }
    }

    /// Hide the banner and empty the output log
    pub fn clear_screen(&mut self) {
        self.banner.visible = false;
        self.log.clear();
        self.epoch.advance();
    }

    /// Finish startup: show the cursor and start taking keystrokes
    pub fn go_interactive(&mut self) {
        self.cursor_revealed = true;
        self.input_attached = true;
    }

    pub fn is_cursor_revealed(&self) -> bool {
        self.cursor_revealed
    }

    pub fn is_input_attached(&self) -> bool {
        self.input_attached
    }
}
