//! Unit Tests for Command Dispatch
//!
//! Built-in commands, interpreter forwarding and fault conversion, checked
//! against a mock interpreter that records every call.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use test_utils::MockInterpreter;
use tysonterm::terminal::dispatch::{HELP_TEXT, NOT_READY_MESSAGE};
use tysonterm::terminal::CommandDispatcher;

fn ready_dispatcher(mock: &MockInterpreter) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new("std.tyson");
    dispatcher.attach(mock.session());
    dispatcher
}

#[tokio::test]
async fn test_empty_command_returns_newline() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("").await;

    assert_eq!(response, "\n");
    assert!(mock.evaluations().is_empty());
}

#[tokio::test]
async fn test_clear_in_any_case() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    for command in ["clear", "CLEAR", "Clear"] {
        assert_eq!(dispatcher.dispatch(command).await, "");
    }
    assert!(mock.evaluations().is_empty());
}

#[tokio::test]
async fn test_help_lists_builtins() {
    let mut dispatcher = CommandDispatcher::new("std.tyson");

    let response = dispatcher.dispatch("HELP").await;

    assert_eq!(response, HELP_TEXT);
    for word in ["help", "clear", "std"] {
        assert!(response.contains(word));
    }
}

#[tokio::test]
async fn test_help_text_is_exact() {
    assert_eq!(
        HELP_TEXT,
        "Commands:\n  help  - show this message\n  clear - clear the screen\n  std - print entire standard library\n  (or enter any valid TysonLang expression)"
    );
}

#[tokio::test]
async fn test_std_returns_resource_contents() {
    let library = "(def {nil} {})\n(def {true} 1)\n";
    let mock = MockInterpreter::new().with_resource("std.tyson", library);
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("Std").await;

    assert_eq!(response, library);
    assert_eq!(mock.resource_reads(), vec!["std.tyson".to_string()]);
    assert!(mock.evaluations().is_empty());
}

#[tokio::test]
async fn test_std_uses_configured_file_name() {
    let mock = MockInterpreter::new().with_resource("prelude.tyson", "prelude");
    let mut dispatcher = CommandDispatcher::new("prelude.tyson");
    dispatcher.attach(mock.session());

    assert_eq!(dispatcher.dispatch("std").await, "prelude");
}

#[tokio::test]
async fn test_std_read_failure_becomes_error_text() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("std").await;

    assert!(response.starts_with("Error: "));
    assert!(response.contains("std.tyson"));
}

#[tokio::test]
async fn test_expression_evaluated_exactly_once() {
    let mock = MockInterpreter::new().with_result("(+ 1 2)", "3");
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("(+ 1 2)").await;

    assert_eq!(response, "3");
    assert_eq!(mock.evaluations(), vec!["(+ 1 2)".to_string()]);
}

#[tokio::test]
async fn test_expression_keeps_original_case() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("(Head {Help})").await;

    assert_eq!(response, MockInterpreter::default_result("(Head {Help})"));
    assert_eq!(mock.evaluations(), vec!["(Head {Help})".to_string()]);
}

#[tokio::test]
async fn test_builtin_must_match_whole_command() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    dispatcher.dispatch("help me").await;

    assert_eq!(mock.evaluations(), vec!["help me".to_string()]);
}

#[tokio::test]
async fn test_fault_becomes_error_text() {
    let mock = MockInterpreter::new().with_fault("(/ 1 0)", "Division By Zero!");
    let mut dispatcher = ready_dispatcher(&mock);

    let response = dispatcher.dispatch("(/ 1 0)").await;

    assert_eq!(response, "Error: Division By Zero!");
    assert_eq!(mock.evaluations().len(), 1);
}

#[tokio::test]
async fn test_session_survives_a_fault() {
    let mock = MockInterpreter::new()
        .with_fault("bad", "unbound symbol")
        .with_result("good", "1");
    let mut dispatcher = ready_dispatcher(&mock);

    dispatcher.dispatch("bad").await;
    let response = dispatcher.dispatch("good").await;

    assert_eq!(response, "1");
    assert_eq!(mock.init_calls(), 1);
}

#[tokio::test]
async fn test_not_ready_without_session() {
    let mut dispatcher = CommandDispatcher::new("std.tyson");

    assert_eq!(dispatcher.dispatch("(+ 1 2)").await, NOT_READY_MESSAGE);
    assert_eq!(dispatcher.dispatch("std").await, NOT_READY_MESSAGE);
    assert_eq!(NOT_READY_MESSAGE, "Interpreter not ready yet.");
}

#[test]
fn test_evaluate_raw_skips_builtins() {
    let mock = MockInterpreter::new();
    let mut dispatcher = ready_dispatcher(&mock);

    let result = dispatcher.evaluate_raw("help");

    assert_eq!(result, MockInterpreter::default_result("help"));
    assert_eq!(mock.evaluations(), vec!["help".to_string()]);
}
