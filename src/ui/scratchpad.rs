//! Scratchpad side panel
//!
//! A multi-line code area with a Run button. Results are appended raw, with
//! no animation, as `> <code>` followed by the result. Run stays disabled
//! until the interpreter session is up.

use eframe::egui;

/// Scratchpad state and widget
#[derive(Debug, Clone, Default)]
pub struct Scratchpad {
    code: String,
    log: String,
    ready: bool,
    /// An evaluation is in flight
    pending: bool,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the Run button
    pub fn set_ready(&mut self) {
        self.ready = true;
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    /// Take the code to evaluate, if Run is currently allowed
    pub fn submit(&mut self) -> Option<String> {
        if !self.ready || self.pending {
            return None;
        }
        self.pending = true;
        Some(self.code.clone())
    }

    /// Append the result of an evaluation
    pub fn record(&mut self, code: &str, result: &str) {
        self.log.push_str(&format!("> {}\n{}\n", code, result));
        self.pending = false;
    }

    /// Draw the panel; returns code to evaluate when Run was clicked
    pub fn render(&mut self, ui: &mut egui::Ui, font_size: f32) -> Option<String> {
        let mut submitted = None;

        ui.heading("Scratchpad");
        ui.add(
            egui::TextEdit::multiline(&mut self.code)
                .code_editor()
                .desired_rows(8)
                .desired_width(f32::INFINITY)
                .font(egui::FontId::monospace(font_size)),
        );

        let run = ui.add_enabled(self.ready && !self.pending, egui::Button::new("Run"));
        if run.clicked() {
            submitted = self.submit();
        }

        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("scratchpad_log")
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(&self.log).font(egui::FontId::monospace(font_size)),
                );
            });

        submitted
    }
}
