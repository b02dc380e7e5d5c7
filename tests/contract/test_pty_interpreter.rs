//! Contract Tests for the PTY Interpreter Bridge
//!
//! A small shell loop stands in for the interpreter: it prints the TysonLang
//! prompt, reads a line and answers `=<line>`. Unix only.

#![cfg(unix)]

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tysonterm::config::InterpreterConfig;
use tysonterm::error::Error;
use tysonterm::interpreter::{EvalFault, InterpreterModule, PtyInterpreter};

const FAKE_REPL: &str = r#"printf 'TysonLang Version 0.1\n'; while printf 'TysonLang> '; IFS= read -r l; do [ "$l" = quit ] && exit 0; printf '=%s\n' "$l"; done"#;

fn fake_config(library_dir: Option<&TempDir>) -> InterpreterConfig {
    InterpreterConfig {
        command: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), FAKE_REPL.to_string()],
        library_dir: library_dir.map(|dir| dir.path().to_path_buf()),
        startup_timeout_ms: 5000,
        ..InterpreterConfig::default()
    }
}

#[test]
fn test_evaluate_returns_interpreter_output() {
    let module = PtyInterpreter::new(fake_config(None));
    let mut session = module.init().unwrap();

    assert_eq!(session.evaluate("(+ 1 2)").unwrap(), "=(+ 1 2)");
    assert_eq!(session.evaluate("hello").unwrap(), "=hello");
}

#[test]
fn test_multiline_code_is_sent_as_one_line() {
    let module = PtyInterpreter::new(fake_config(None));
    let mut session = module.init().unwrap();

    assert_eq!(session.evaluate("(def {x}\n10)").unwrap(), "=(def {x} 10)");
}

#[test]
fn test_exit_is_a_terminated_fault() {
    let module = PtyInterpreter::new(fake_config(None));
    let mut session = module.init().unwrap();

    let result = session.evaluate("quit");

    assert!(matches!(result, Err(EvalFault::Terminated(_))));
}

#[test]
fn test_resources_come_from_library_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("std.tyson"), "(fun {id x} {x})\n").unwrap();
    let module = PtyInterpreter::new(fake_config(Some(&dir)));
    let session = module.init().unwrap();

    assert_eq!(session.read_resource("std.tyson").unwrap(), "(fun {id x} {x})\n");
    assert!(matches!(
        session.read_resource("missing.tyson"),
        Err(Error::ResourceReadFailed { .. })
    ));
}

#[test]
fn test_no_prompt_times_out() {
    let config = InterpreterConfig {
        command: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), "sleep 5".to_string()],
        startup_timeout_ms: 300,
        ..InterpreterConfig::default()
    };

    let result = PtyInterpreter::new(config).init();

    match result {
        Err(Error::InterpreterStartupTimeout { waited, .. }) => {
            assert_eq!(waited, Duration::from_millis(300))
        }
        Err(other) => panic!("expected startup timeout, got {}", other),
        Ok(_) => panic!("expected startup timeout"),
    }
}

#[test]
fn test_early_exit_fails_startup() {
    let config = InterpreterConfig {
        command: "/bin/sh".to_string(),
        args: vec!["-c".to_string(), "exit 3".to_string()],
        ..InterpreterConfig::default()
    };

    assert!(PtyInterpreter::new(config).init().is_err());
}
