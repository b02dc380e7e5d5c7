//! UI components and rendering
//!
//! egui widgets for the terminal pane and the scratchpad side panel. Widgets
//! only draw; terminal behavior lives in [`crate::terminal`].

pub mod colors;
pub mod scratchpad;
pub mod terminal_pane;

// Re-exports for convenience
pub use colors::{TerminalColors, ToEguiColor};
pub use scratchpad::Scratchpad;
pub use terminal_pane::{cursor_phase, TerminalPane};
