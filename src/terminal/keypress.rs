//! Keypress handling
//!
//! Turns raw key events into command line edits. The handler only acts when
//! no other widget (text field, text area, button) holds keyboard focus and
//! the startup sequence has attached keyboard input; otherwise the event is
//! left alone for whoever owns it.
//!
//! | Key | Effect |
//! |-----|--------|
//! | Enter | capture trimmed command, clear line, echo `> command`, apply `clear`, submit |
//! | Backspace | remove the last character, if any |
//! | printable char without Ctrl/Alt/Meta | append to the line |
//! | anything else | ignored, not consumed |

use super::{ScreenEffect, TerminalView};

/// Modifier flags carried by a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        meta: false,
        shift: false,
    };

    /// True when a command modifier (Ctrl, Alt or Meta) is held
    pub fn any_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    /// A key that produces a single character
    Char(char),
    /// Function keys, arrows, modifier-only presses and the like
    Other(String),
}

/// One key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter, Modifiers::NONE)
    }

    pub fn backspace() -> Self {
        Self::new(Key::Backspace, Modifiers::NONE)
    }

    /// An unmodified character key
    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch), Modifiers::NONE)
    }

    /// Printable single character with no command modifier
    pub fn printable(&self) -> Option<char> {
        match self.key {
            Key::Char(ch) if !ch.is_control() && !self.modifiers.any_command() => Some(ch),
            _ => None,
        }
    }
}

/// Whether some other widget currently owns keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// Nothing focused; keys belong to the terminal
    Free,
    /// A text field, text area or button has focus
    Captured,
}

/// Result of handling one key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the default action proceeds
    Ignored,
    /// The command line changed (or a Backspace hit an empty line)
    Edited,
    /// Enter pressed; the trimmed command must be dispatched
    Submitted(String),
}

impl KeyOutcome {
    /// Whether the event's default action must be suppressed
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// Apply one key event to the terminal view
pub fn handle_keypress(view: &mut TerminalView, input: &KeyInput, focus: FocusState) -> KeyOutcome {
    if focus == FocusState::Captured || !view.is_input_attached() {
        return KeyOutcome::Ignored;
    }

    match &input.key {
        Key::Enter => {
            let command = view.line.take_command();
            view.log.push_echo(&command);
            if let Some(effect) = ScreenEffect::for_command(&command) {
                view.apply_effect(effect);
            }
            trace!("Submitted command: {:?}", command);
            KeyOutcome::Submitted(command)
        }
        Key::Backspace => {
            view.line.backspace();
            KeyOutcome::Edited
        }
        _ => match input.printable() {
            Some(ch) => {
                view.line.push(ch);
                KeyOutcome::Edited
            }
            None => KeyOutcome::Ignored,
        },
    }
}
