//! Terminal pane rendering
//!
//! Draws a [`TerminalView`]: banner, instructions, output log and the prompt
//! line with its blinking cursor. The pane keeps no terminal state of its
//! own; everything comes from the view passed to [`TerminalPane::render`].

use std::time::Duration;

use eframe::egui;

use super::colors::TerminalColors;
use crate::config::UiConfig;
use crate::terminal::{EntryKind, TerminalView};

/// Whether the cursor is in the "on" half of its blink cycle at `time` seconds
pub fn cursor_phase(time: f64, blink: Duration) -> bool {
    let period = blink.as_secs_f64();
    if period <= 0.0 {
        return true;
    }
    ((time / period).floor() as u64) % 2 == 0
}

/// Renderer for the terminal surfaces
#[derive(Debug, Clone)]
pub struct TerminalPane {
    font_size: f32,
    prompt: String,
    blink: Duration,
    colors: TerminalColors,
}

impl TerminalPane {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            font_size: ui.font_size,
            prompt: ui.prompt.clone(),
            blink: Duration::from_millis(ui.cursor_blink_ms),
            colors: TerminalColors::from_config(&ui.colors),
        }
    }

    pub fn colors(&self) -> &TerminalColors {
        &self.colors
    }

    /// Text of the prompt line as it should appear at `time` seconds
    pub fn prompt_line(&self, view: &TerminalView, time: f64) -> String {
        let cursor_visible = view.is_cursor_revealed() && cursor_phase(time, self.blink);
        format!("{}{}", self.prompt, view.line.rendered(cursor_visible))
    }

    fn text(&self, text: &str, color: egui::Color32) -> egui::RichText {
        egui::RichText::new(text)
            .font(egui::FontId::monospace(self.font_size))
            .color(color)
    }

    /// Draw the whole terminal into `ui`
    pub fn render(&self, ui: &mut egui::Ui, view: &TerminalView) {
        let time = ui.input(|i| i.time);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;

                if view.banner.visible && !view.banner.text.is_empty() {
                    ui.label(self.text(&view.banner.text, self.colors.banner));
                }
                if view.instructions.visible && !view.instructions.text.is_empty() {
                    ui.label(self.text(&view.instructions.text, self.colors.foreground));
                }

                for entry in view.log.entries() {
                    let color = match entry.kind {
                        EntryKind::Echo => self.colors.echo,
                        EntryKind::Response => self.colors.foreground,
                    };
                    ui.label(self.text(&entry.text, color));
                }

                if view.is_cursor_revealed() {
                    ui.label(self.text(&self.prompt_line(view, time), self.colors.prompt));
                }
            });

        if view.is_cursor_revealed() {
            ui.ctx().request_repaint_after(self.blink);
        }
    }
}
