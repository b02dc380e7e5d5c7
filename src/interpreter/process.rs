//! PTY-hosted interpreter
//!
//! Spawns the interpreter executable inside a pseudoterminal (so line-editing
//! interpreters print their prompt exactly as they would for a person) and
//! turns its read-eval-print loop into synchronous `evaluate` calls.
//!
//! One evaluation is: write the code as a single line, collect output until
//! the interpreter prompt reappears, then drop the terminal's echo of the
//! input line and the prompt itself.

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use super::ansi::AnsiStripper;
use super::{EvalFault, InterpreterModule, InterpreterSession};
use crate::config::InterpreterConfig;
use crate::error::{Error, Result};

/// Interpreter module backed by an external executable
#[derive(Debug, Clone)]
pub struct PtyInterpreter {
    config: InterpreterConfig,
}

impl PtyInterpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }
}

impl InterpreterModule for PtyInterpreter {
    fn name(&self) -> &str {
        &self.config.command
    }

    fn init(&self) -> Result<Box<dyn InterpreterSession>> {
        let session = PtySession::spawn(&self.config)?;
        Ok(Box::new(session))
    }
}

/// A running interpreter process
pub struct PtySession {
    /// Interpreter process; killed when the session is dropped
    child: Box<dyn Child + Send + Sync>,
    /// Kept alive so the PTY stays open
    _master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    /// Raw output chunks from the reader thread
    output_rx: Receiver<Vec<u8>>,
    prompt: String,
    library_dir: PathBuf,
    stripper: AnsiStripper,
}

impl PtySession {
    /// Spawn the interpreter and wait for its first prompt
    pub fn spawn(config: &InterpreterConfig) -> Result<Self> {
        let command = config.command.as_str();
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows: 24,
                cols: 200,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| Error::PtyCreationFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let mut cmd_builder = CommandBuilder::new(command);
        cmd_builder.args(&config.args);
        cmd_builder.env("TERM", "dumb");
        for (key, value) in &config.environment {
            cmd_builder.env(key, value);
        }
        let library_dir = config.resolved_library_dir();
        cmd_builder.cwd(&library_dir);

        let child = pair
            .slave
            .spawn_command(cmd_builder)
            .map_err(|e| Error::InterpreterSpawnFailed {
                command: command.to_string(),
                reason: e.to_string(),
            })?;
        // The child holds its own copy of the slave side
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| Error::PtyReaderCloneFailed {
                reason: e.to_string(),
            })?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| Error::PtyWriterTakeFailed {
                reason: e.to_string(),
            })?;

        let (output_tx, output_rx) = channel::<Vec<u8>>();

        // Reader thread: forward raw PTY output until EOF
        thread::Builder::new()
            .name("tysonterm-pty-reader".to_string())
            .spawn(move || {
                let mut buf = [0u8; 4096];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => {
                            debug!("Interpreter PTY reached EOF");
                            break;
                        }
                        Ok(n) => {
                            if output_tx.send(buf[..n].to_vec()).is_err() {
                                break;
                            }
                        }
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            debug!("Interpreter PTY read error: {}", e);
                            break;
                        }
                    }
                }
            })?;

        let mut session = Self {
            child,
            _master: pair.master,
            writer,
            output_rx,
            prompt: config.prompt.clone(),
            library_dir,
            stripper: AnsiStripper::new()?,
        };

        let banner = session.wait_for_first_prompt(config)?;
        info!(
            "Interpreter '{}' ready (pid {:?})",
            command,
            session.child.process_id()
        );
        if !banner.trim().is_empty() {
            debug!("Interpreter banner: {}", banner.trim());
        }

        Ok(session)
    }

    /// Consume startup output up to and including the first prompt
    fn wait_for_first_prompt(&mut self, config: &InterpreterConfig) -> Result<String> {
        let timeout = config.startup_timeout();
        let deadline = Instant::now() + timeout;
        let mut raw = Vec::new();

        loop {
            if let Some(before) = output_before_prompt(&self.stripper, &raw, &self.prompt) {
                return Ok(before);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.output_rx.recv_timeout(remaining) {
                Ok(chunk) => raw.extend_from_slice(&chunk),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(Error::InterpreterStartupTimeout {
                        command: config.command.clone(),
                        waited: timeout,
                    })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(Error::InterpreterExited {
                        command: config.command.clone(),
                    })
                }
            }
        }
    }

    /// Collect output until the prompt reappears
    fn read_until_prompt(&mut self) -> std::result::Result<String, EvalFault> {
        let mut raw = Vec::new();
        loop {
            if let Some(before) = output_before_prompt(&self.stripper, &raw, &self.prompt) {
                return Ok(before);
            }

            match self.output_rx.recv() {
                Ok(chunk) => raw.extend_from_slice(&chunk),
                Err(_) => {
                    let partial = self.stripper.strip(&String::from_utf8_lossy(&raw));
                    return Err(EvalFault::Terminated(if partial.trim().is_empty() {
                        "no output before exit".to_string()
                    } else {
                        partial.trim().to_string()
                    }));
                }
            }
        }
    }
}

/// Raw bytes at the end of the output checked for the prompt
const PROMPT_WINDOW: usize = 1024;

/// Stripped output preceding the prompt, once `raw` ends with the prompt.
///
/// Only a bounded tail is stripped while waiting; the whole buffer is
/// stripped once, when the prompt has arrived.
pub fn output_before_prompt(stripper: &AnsiStripper, raw: &[u8], prompt: &str) -> Option<String> {
    let start = raw.len().saturating_sub(prompt.len() + PROMPT_WINDOW);
    let tail = stripper.strip(&String::from_utf8_lossy(&raw[start..]));
    if !tail.ends_with(prompt) {
        return None;
    }

    let text = stripper.strip(&String::from_utf8_lossy(raw));
    text.strip_suffix(prompt).map(str::to_string)
}

/// Turn the text between input and prompt into the evaluation result
pub fn extract_result(output: &str, line: &str) -> String {
    let body = match output.split_once('\n') {
        Some((first, rest)) if first.trim_end() == line.trim_end() => rest,
        _ => output,
    };
    body.trim_end_matches('\n').to_string()
}

/// Interpreters read a line at a time
fn single_line(code: &str) -> String {
    code.lines().collect::<Vec<_>>().join(" ")
}

impl InterpreterSession for PtySession {
    fn evaluate(&mut self, code: &str) -> std::result::Result<String, EvalFault> {
        let line = single_line(code);
        trace!("Sending to interpreter: {}", line);

        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        let output = self.read_until_prompt()?;
        Ok(extract_result(&output, &line))
    }

    fn read_resource(&self, name: &str) -> Result<String> {
        let path = self.library_dir.join(name);
        fs::read_to_string(&path).map_err(|e| Error::ResourceReadFailed {
            path,
            reason: e.to_string(),
        })
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("Interpreter already gone: {}", e);
        }
    }
}
