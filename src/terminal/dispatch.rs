//! Command dispatch
//!
//! Resolves a submitted command line into response text. A handful of
//! built-ins are answered locally; everything else goes to the interpreter
//! session. Dispatch never fails: a missing session or an interpreter fault
//! becomes response text.
//!
//! `clear` also changes the screen. That part is decided when the command is
//! submitted ([`ScreenEffect::for_command`]), not when the dispatcher gets to
//! it, so a clear never reaches past commands typed after it.

use crate::interpreter::InterpreterSession;

/// Usage text printed by `help`
pub const HELP_TEXT: &str = "Commands:
  help  - show this message
  clear - clear the screen
  std - print entire standard library
  (or enter any valid TysonLang expression)";

/// Response when no interpreter session is attached
pub const NOT_READY_MESSAGE: &str = "Interpreter not ready yet.";

/// Side effect a built-in asks the view to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEffect {
    /// Hide the banner and empty the output log
    Clear,
}

impl ScreenEffect {
    /// Effect of submitting `command`, if it has one
    pub fn for_command(command: &str) -> Option<Self> {
        match Builtin::parse(command) {
            Some(Builtin::Clear) => Some(ScreenEffect::Clear),
            _ => None,
        }
    }
}

/// Commands handled without the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Empty,
    Clear,
    Help,
    Std,
}

impl Builtin {
    /// Match a whole command, ignoring letter case
    pub fn parse(command: &str) -> Option<Self> {
        match command.to_lowercase().as_str() {
            "" => Some(Builtin::Empty),
            "clear" => Some(Builtin::Clear),
            "help" => Some(Builtin::Help),
            "std" => Some(Builtin::Std),
            _ => None,
        }
    }
}

/// Routes commands to built-ins or the interpreter session
pub struct CommandDispatcher {
    session: Option<Box<dyn InterpreterSession>>,
    /// Resource printed by `std`
    std_file: String,
}

impl CommandDispatcher {
    /// Create a dispatcher with no session attached
    pub fn new(std_file: impl Into<String>) -> Self {
        Self {
            session: None,
            std_file: std_file.into(),
        }
    }

    /// Attach the session returned by the module's init call
    pub fn attach(&mut self, session: Box<dyn InterpreterSession>) {
        self.session = Some(session);
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Resolve one trimmed command line into response text
    pub async fn dispatch(&mut self, command: &str) -> String {
        match Builtin::parse(command) {
            Some(Builtin::Empty) => "\n".to_string(),
            Some(Builtin::Clear) => String::new(),
            Some(Builtin::Help) => HELP_TEXT.to_string(),
            Some(Builtin::Std) => self.standard_library(),
            None => self.evaluate_raw(command),
        }
    }

    /// Evaluate code directly, skipping built-in matching
    pub fn evaluate_raw(&mut self, code: &str) -> String {
        let Some(session) = self.session.as_mut() else {
            warn!("Evaluation requested before the interpreter was ready");
            return NOT_READY_MESSAGE.to_string();
        };

        match session.evaluate(code) {
            Ok(result) => result,
            Err(fault) => {
                warn!("Interpreter fault while evaluating {:?}: {}", code, fault);
                format!("Error: {}", fault)
            }
        }
    }

    fn standard_library(&self) -> String {
        let Some(session) = self.session.as_ref() else {
            return NOT_READY_MESSAGE.to_string();
        };

        match session.read_resource(&self.std_file) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Failed to read {}: {}", self.std_file, e);
                format!("Error: {}", e)
            }
        }
    }
}
