//! Integration Tests for the Startup Sequence
//!
//! `run_startup` against a mock interpreter: init exactly once, banner then
//! instructions with the configured pauses, and nothing animated when init
//! fails.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::cell::Cell;
use std::time::Duration;

use test_utils::{create_test_config, MockInterpreter, RecordingSink};
use tokio::time::Instant;
use tysonterm::terminal::bootstrap::{run_startup, StartupScript};
use tysonterm::terminal::{CancelToken, Surface, TerminalView, Typewriter};

fn script() -> StartupScript {
    StartupScript {
        banner: "TYSON".to_string(),
        instructions: "Enter a command.".to_string(),
        pause: Duration::from_millis(500),
    }
}

#[tokio::test(start_paused = true)]
async fn test_banner_then_instructions() {
    let mock = MockInterpreter::new();
    let typewriter = Typewriter::new(Duration::from_millis(5));
    let mut banner = RecordingSink::new();
    let mut instructions = RecordingSink::new();
    let ready = Cell::new(false);

    let result = run_startup(
        &mock,
        &typewriter,
        &script(),
        &mut banner,
        &mut instructions,
        &CancelToken::new(),
        || ready.set(true),
    )
    .await;

    assert!(result.is_ok());
    assert!(ready.get());
    assert_eq!(mock.init_calls(), 1);
    assert_eq!(banner.text, "TYSON");
    assert_eq!(banner.append_count(), 5);
    assert_eq!(instructions.text, "Enter a command.");
}

#[tokio::test(start_paused = true)]
async fn test_startup_timing() {
    let mock = MockInterpreter::new();
    let delay = Duration::from_millis(5);
    let typewriter = Typewriter::new(delay);
    let script = script();
    let start = Instant::now();

    run_startup(
        &mock,
        &typewriter,
        &script,
        &mut RecordingSink::new(),
        &mut RecordingSink::new(),
        &CancelToken::new(),
        || {},
    )
    .await
    .unwrap();

    // Two pauses, then (n - 1) delays for each text
    let banner_time = delay * (script.banner.chars().count() as u32 - 1);
    let instructions_time = delay * (script.instructions.chars().count() as u32 - 1);
    assert_eq!(
        start.elapsed(),
        script.pause * 2 + banner_time + instructions_time
    );
}

#[tokio::test(start_paused = true)]
async fn test_session_is_usable_after_startup() {
    let mock = MockInterpreter::new().with_result("(+ 1 2)", "3");
    let typewriter = Typewriter::default();

    let mut session = run_startup(
        &mock,
        &typewriter,
        &script(),
        &mut RecordingSink::new(),
        &mut RecordingSink::new(),
        &CancelToken::new(),
        || {},
    )
    .await
    .unwrap();

    assert_eq!(session.evaluate("(+ 1 2)").unwrap(), "3");
}

#[tokio::test(start_paused = true)]
async fn test_failed_init_animates_nothing() {
    let mock = MockInterpreter::failing();
    let typewriter = Typewriter::default();
    let mut banner = RecordingSink::new();
    let mut instructions = RecordingSink::new();
    let ready = Cell::new(false);
    let start = Instant::now();

    let result = run_startup(
        &mock,
        &typewriter,
        &script(),
        &mut banner,
        &mut instructions,
        &CancelToken::new(),
        || ready.set(true),
    )
    .await;

    assert!(result.is_err());
    assert!(!ready.get());
    assert_eq!(mock.init_calls(), 1);
    assert!(banner.text.is_empty());
    assert!(instructions.text.is_empty());
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_startup_into_view_then_interactive() {
    let mock = MockInterpreter::new();
    let config = create_test_config();
    let typewriter = Typewriter::new(config.typewriter.char_delay());
    let script = StartupScript::from_config(&config);
    let mut view = TerminalView::new(&config.ui.cursor);

    let mut banner = String::new();
    let mut instructions = String::new();
    run_startup(
        &mock,
        &typewriter,
        &script,
        &mut banner,
        &mut instructions,
        &CancelToken::new(),
        || {},
    )
    .await
    .unwrap();
    view.append_str(Surface::Banner, &banner);
    view.append_str(Surface::Instructions, &instructions);
    assert!(!view.is_input_attached());

    view.go_interactive();

    assert_eq!(view.banner.text, config.ui.banner);
    assert_eq!(view.instructions.text, "Enter a command. Type 'help' for options.");
    assert!(view.is_input_attached());
    assert!(view.is_cursor_revealed());
}
