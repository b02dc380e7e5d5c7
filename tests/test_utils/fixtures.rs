//! Test Fixtures
//!
//! Common configuration and output sinks for testing

use tysonterm::config::Config;
use tysonterm::terminal::{OutputSink, Surface, TerminalView};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config::default()
}

/// A terminal view that has finished startup
pub fn interactive_view() -> TerminalView {
    let mut view = TerminalView::new("_");
    view.go_interactive();
    view
}

/// Sink that records every append
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub text: String,
    /// Character count after each single-character append
    pub lengths: Vec<usize>,
    /// Bulk appends, in order
    pub bulk: Vec<String>,
    pub scrolls: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_count(&self) -> usize {
        self.lengths.len()
    }
}

impl OutputSink for RecordingSink {
    fn append(&mut self, ch: char) {
        self.text.push(ch);
        self.lengths.push(self.text.chars().count());
    }

    fn append_str(&mut self, text: &str) {
        self.text.push_str(text);
        self.bulk.push(text.to_string());
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }
}

/// Sink writing straight into one surface of a terminal view
pub struct ViewSink<'a> {
    pub view: &'a mut TerminalView,
    pub surface: Surface,
}

impl<'a> ViewSink<'a> {
    pub fn new(view: &'a mut TerminalView, surface: Surface) -> Self {
        Self { view, surface }
    }
}

impl OutputSink for ViewSink<'_> {
    fn append(&mut self, ch: char) {
        self.view.append(self.surface, ch);
    }

    fn append_str(&mut self, text: &str) {
        self.view.append_str(self.surface, text);
    }
}
