//! Interpreter bridge
//!
//! The language itself lives outside this crate. TysonTerm reaches it through
//! two traits: an [`InterpreterModule`] that is initialized exactly once and
//! hands back an owned [`InterpreterSession`], and the session, which evaluates
//! source strings and exposes the interpreter's bundled resources.
//!
//! The production bridge is [`PtyInterpreter`], which drives an interpreter
//! executable through a pseudoterminal.

pub mod ansi;
pub mod process;

pub use process::PtyInterpreter;

use crate::error::Result;

/// Fault raised by an evaluation call
#[derive(Debug, thiserror::Error)]
pub enum EvalFault {
    /// The interpreter reported a runtime fault
    #[error("{0}")]
    Runtime(String),

    /// The interpreter went away before producing a result
    #[error("interpreter terminated: {0}")]
    Terminated(String),

    /// Input could not be delivered to the interpreter
    #[error("failed to send input: {0}")]
    Io(#[from] std::io::Error),
}

/// An interpreter that can be brought up into a session
pub trait InterpreterModule: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Initialize interpreter state and return the owned session handle.
    ///
    /// Must be called exactly once before any evaluation.
    fn init(&self) -> Result<Box<dyn InterpreterSession>>;
}

/// Live interpreter state
pub trait InterpreterSession: Send {
    /// Evaluate one piece of source text and return its textual result.
    ///
    /// Synchronous: the caller is blocked until the interpreter answers.
    fn evaluate(&mut self, code: &str) -> std::result::Result<String, EvalFault>;

    /// Read a bundled resource (e.g. the standard library) as UTF-8 text
    fn read_resource(&self, name: &str) -> Result<String>;
}
