//! Main application structure
//!
//! `TysonTermApp` implements `eframe::App`. It owns the terminal view and the
//! scratchpad, forwards keystrokes to the terminal handler and applies the
//! results coming back from the background loop in [`async_ops`].
//!
//! ## Module Organization
//!
//! - `mod.rs` - application struct, eframe::App impl, result polling
//! - `async_ops.rs` - background loop owning the interpreter session
//! - `input.rs` - egui event translation and terminal keystrokes
//!
//! ### UI Layout
//!
//! ```text
//! ┌───────────────────────────────┬──────────────┐
//! │ Central Panel (Terminal)      │ Side Panel   │
//! │ - banner                      │ (Scratchpad) │
//! │ - instructions                │ - code area  │
//! │ - output log                  │ - Run button │
//! │ - prompt + cursor             │ - results    │
//! └───────────────────────────────┴──────────────┘
//! ```

mod async_ops;
mod input;

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tysonterm::config::RuntimeConfig;
use tysonterm::error::Result;
use tysonterm::interpreter::{InterpreterModule, PtyInterpreter};
use tysonterm::terminal::bootstrap::StartupScript;
use tysonterm::terminal::{CancelToken, CommandDispatcher, Surface, TerminalView, Typewriter};
use tysonterm::ui::{Scratchpad, TerminalPane};

use async_ops::OperationContext;

/// Async operation request sent from UI to background task
#[derive(Debug, Clone)]
pub(crate) enum AsyncRequest {
    /// Initialize the interpreter and play the startup animation
    Bootstrap,
    /// Resolve a submitted terminal command; `epoch` is the view's clear
    /// epoch right after submission
    Dispatch { command: String, epoch: u64 },
    /// Evaluate scratchpad code without animation
    Evaluate(String),
}

/// Async operation result sent from background task to UI
#[derive(Debug, Clone)]
pub(crate) enum AsyncResult {
    /// One animated character
    Append { surface: Surface, epoch: u64, ch: char },
    /// A run of text appended at once (skipped animation)
    AppendText {
        surface: Surface,
        epoch: u64,
        text: String,
    },
    /// A dispatched command's output is complete
    ResponseFinished,
    /// Interpreter session initialized
    SessionReady,
    /// Startup animation finished; terminal takes keystrokes
    InteractiveReady,
    /// Interpreter could not be initialized
    StartupFailed(String),
    /// Raw result of a scratchpad evaluation
    ScratchpadResult { code: String, result: String },
}

/// Main TysonTerm application
pub struct TysonTermApp {
    /// Terminal UI state
    view: TerminalView,
    /// Terminal renderer
    pane: TerminalPane,
    /// Scratchpad side panel
    scratchpad: Scratchpad,
    /// Runtime configuration
    runtime_config: RuntimeConfig,
    /// Shared with the background loop; Escape cancels the running animation
    cancel: CancelToken,
    /// Bootstrap request already sent
    bootstrap_requested: bool,
    /// Startup animation running or about to run
    startup_pending: bool,
    /// Dispatched commands whose output has not finished
    pending_responses: usize,
    /// Tokio runtime for async operations
    /// Note: Field is kept alive to prevent runtime shutdown, even though it's not directly accessed
    #[allow(dead_code)]
    runtime: tokio::runtime::Runtime,
    /// Channel for sending async requests from UI to background
    async_tx: mpsc::UnboundedSender<AsyncRequest>,
    /// Channel for receiving async results from background to UI
    async_rx: mpsc::UnboundedReceiver<AsyncResult>,
}

impl TysonTermApp {
    /// Create the application and spawn the background loop
    pub fn new(ctx: &egui::Context, runtime_config: RuntimeConfig) -> Result<Self> {
        info!("Initializing TysonTerm application");

        let config = runtime_config.config();
        let module: Arc<dyn InterpreterModule> =
            Arc::new(PtyInterpreter::new(config.interpreter.clone()));

        // Create Tokio runtime for async operations
        // Try multi-threaded first, fallback to single-threaded if that fails
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("tysonterm-async")
            .enable_all()
            .build()
            .or_else(|e| {
                warn!("Failed to create multi-threaded runtime: {}, trying single-threaded", e);
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;

        // Create channels for async communication
        let (request_tx, mut request_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let view = TerminalView::new(&config.ui.cursor);
        let cancel = CancelToken::new();
        let op = OperationContext {
            module,
            dispatcher: CommandDispatcher::new(config.interpreter.std_file.clone()),
            typewriter: Typewriter::new(config.typewriter.char_delay()),
            script: StartupScript::from_config(config),
            cancel: cancel.clone(),
            epoch: view.clear_epoch().clone(),
            ctx: ctx.clone(),
        };

        // Spawn background task to handle async operations
        runtime.spawn(async move {
            async_ops::async_operation_loop(&mut request_rx, result_tx, op).await;
        });

        Ok(Self {
            view,
            pane: TerminalPane::from_config(&config.ui),
            scratchpad: Scratchpad::new(),
            cancel,
            bootstrap_requested: false,
            startup_pending: false,
            pending_responses: 0,
            runtime,
            async_tx: request_tx,
            async_rx: result_rx,
            runtime_config,
        })
    }

    /// Apply everything the background loop has produced since the last frame
    fn poll_async_results(&mut self) {
        while let Ok(result) = self.async_rx.try_recv() {
            self.apply_result(result);
        }
    }

    fn apply_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Append { surface, epoch, ch } => {
                self.view.append_output(epoch, surface, ch.encode_utf8(&mut [0; 4]));
            }
            AsyncResult::AppendText {
                surface,
                epoch,
                text,
            } => {
                self.view.append_output(epoch, surface, &text);
            }
            AsyncResult::ResponseFinished => {
                self.pending_responses = self.pending_responses.saturating_sub(1);
            }
            AsyncResult::SessionReady => {
                info!("Interpreter session ready");
                self.scratchpad.set_ready();
            }
            AsyncResult::InteractiveReady => {
                self.startup_pending = false;
                self.view.go_interactive();
            }
            AsyncResult::StartupFailed(msg) => {
                self.startup_pending = false;
                warn!("Terminal stays non-interactive: {}", msg);
            }
            AsyncResult::ScratchpadResult { code, result } => {
                self.scratchpad.record(&code, &result);
            }
        }
    }

    /// Startup or a dispatched command still has output to animate
    fn output_pending(&self) -> bool {
        self.startup_pending || self.pending_responses > 0
    }

    /// Queue a command submitted from the terminal.
    ///
    /// `cleared` means submitting it cleared the screen; output still
    /// animating for earlier commands is then cut short.
    fn submit_command(&mut self, command: String, cleared: bool) {
        if cleared && self.pending_responses > 0 {
            debug!("Screen cleared, finishing earlier output");
            self.cancel.cancel();
        }

        let epoch = self.view.clear_epoch().current();
        match self.async_tx.send(AsyncRequest::Dispatch { command, epoch }) {
            Ok(()) => self.pending_responses += 1,
            Err(e) => error!("Failed to send Dispatch request: {}", e),
        }
    }

    fn render_scratchpad(&mut self, ctx: &egui::Context) {
        let font_size = self.runtime_config.config().ui.font_size;
        let mut submitted = None;

        egui::SidePanel::right("scratchpad")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                submitted = self.scratchpad.render(ui, font_size);
            });

        if let Some(code) = submitted {
            if let Err(e) = self.async_tx.send(AsyncRequest::Evaluate(code)) {
                error!("Failed to send Evaluate request: {}", e);
            }
        }
    }

    fn render_terminal(&self, ctx: &egui::Context) {
        let frame = egui::Frame::default()
            .fill(self.pane.colors().background)
            .inner_margin(egui::Margin::same(8));

        egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| self.pane.render(ui, &self.view));
    }
}

impl eframe::App for TysonTermApp {
    // Required by eframe 0.34; all per-frame work happens in `update`, which
    // eframe still calls before `ui`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Start the interpreter on first frame
        if !self.bootstrap_requested {
            self.bootstrap_requested = true;
            info!("Starting interpreter...");
            match self.async_tx.send(AsyncRequest::Bootstrap) {
                Ok(()) => self.startup_pending = true,
                Err(e) => error!("Failed to send Bootstrap request: {}", e),
            }
        }

        self.poll_async_results();
        self.handle_terminal_input(ctx);

        if self.runtime_config.config().ui.show_scratchpad {
            self.render_scratchpad(ctx);
        }
        self.render_terminal(ctx);
    }
}
