//! Color utilities for UI rendering
//!
//! Converts the RGB triples from the configuration into egui colors once, so
//! the render path only copies `Color32` values.

use crate::config::ColorConfig;
use eframe::egui;

/// Extension trait to convert config colors to egui::Color32
pub trait ToEguiColor {
    fn to_egui(&self) -> egui::Color32;
}

impl ToEguiColor for [u8; 3] {
    fn to_egui(&self) -> egui::Color32 {
        egui::Color32::from_rgb(self[0], self[1], self[2])
    }
}

/// Terminal colors cached from the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalColors {
    pub background: egui::Color32,
    pub foreground: egui::Color32,
    pub banner: egui::Color32,
    pub prompt: egui::Color32,
    pub echo: egui::Color32,
}

impl TerminalColors {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            background: colors.background.to_egui(),
            foreground: colors.foreground.to_egui(),
            banner: colors.banner.to_egui(),
            prompt: colors.prompt.to_egui(),
            echo: colors.echo.to_egui(),
        }
    }
}

impl Default for TerminalColors {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}
