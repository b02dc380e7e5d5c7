//! Input and Keyboard Handling
//!
//! Feeds egui input events to the terminal keypress handler.
//!
//! | Key | Action | Works When Focused |
//! |-----|--------|-------------------|
//! | Escape | Finish the running output animation at once | Always, while output is pending |
//! | Enter | Submit the command line | No focus |
//! | Backspace | Delete the last character | No focus |
//! | Printable text | Append to the command line | No focus |
//!
//! "Focused" means a scratchpad widget holds keyboard focus. Events the
//! terminal consumes are removed from the frame's input so no widget sees
//! them.

use eframe::egui;
use tysonterm::terminal::{handle_keypress, FocusState, Key, KeyInput, KeyOutcome, Modifiers};

use super::TysonTermApp;

impl TysonTermApp {
    /// Handle terminal keystrokes for this frame
    pub(super) fn handle_terminal_input(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.output_pending() {
            self.cancel.cancel();
        }

        let focus = if ctx.memory(|mem| mem.focused().is_none()) {
            FocusState::Free
        } else {
            FocusState::Captured
        };

        let (events, modifiers) = ctx.input(|i| (i.events.clone(), i.modifiers));
        let mut consumed = Vec::new();

        for (index, event) in events.iter().enumerate() {
            for input in key_inputs(event, modifiers) {
                let epoch = self.view.clear_epoch().current();
                let outcome = handle_keypress(&mut self.view, &input, focus);
                if outcome.suppresses_default() && !consumed.contains(&index) {
                    consumed.push(index);
                }
                if let KeyOutcome::Submitted(command) = outcome {
                    let cleared = self.view.clear_epoch().current() != epoch;
                    self.submit_command(command, cleared);
                }
            }
        }

        if !consumed.is_empty() {
            ctx.input_mut(|i| {
                let mut index = 0;
                i.events.retain(|_| {
                    let keep = !consumed.contains(&index);
                    index += 1;
                    keep
                });
            });
        }
    }
}

fn to_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
        shift: modifiers.shift,
    }
}

/// Translate one egui event into terminal key inputs.
///
/// Text events yield one input per character; Enter and Backspace presses
/// yield one input each; other key presses are passed on as `Key::Other`.
pub(super) fn key_inputs(event: &egui::Event, frame_modifiers: egui::Modifiers) -> Vec<KeyInput> {
    match event {
        egui::Event::Text(text) => {
            let modifiers = to_modifiers(frame_modifiers);
            text.chars()
                .map(|ch| KeyInput::new(Key::Char(ch), modifiers))
                .collect()
        }
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => {
            let key = match key {
                egui::Key::Enter => Key::Enter,
                egui::Key::Backspace => Key::Backspace,
                other => Key::Other(other.name().to_string()),
            };
            vec![KeyInput::new(key, to_modifiers(*modifiers))]
        }
        _ => Vec::new(),
    }
}
