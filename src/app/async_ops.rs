//! Async Operations
//!
//! Background task that owns the interpreter session. The UI thread never
//! touches the interpreter directly; it sends requests and applies the
//! results it receives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐          ┌──────────────────┐
//! │    UI Thread     │          │  Background Task │
//! │  (TysonTermApp)  │          │ (async_ops loop) │
//! │                  │          │                  │
//! │  async_tx ─────────────────▶│  request_rx      │
//! │                  │          │                  │
//! │  async_rx ◀─────────────────│  result_tx       │
//! └──────────────────┘          └──────────────────┘
//! ```
//!
//! ## Supported Operations
//!
//! - **Bootstrap**: initialize the interpreter and play the startup animation
//! - **Dispatch**: resolve a terminal command and animate the response
//! - **Evaluate**: evaluate scratchpad code and return the raw result
//!
//! Requests are handled one at a time, in the order they were sent, so
//! responses never interleave. A command submitted before the latest screen
//! clear is still evaluated, but its response is not animated.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tysonterm::interpreter::InterpreterModule;
use tysonterm::terminal::bootstrap::{run_startup, StartupScript};
use tysonterm::terminal::{
    CancelToken, ClearEpoch, CommandDispatcher, OutputSink, Surface, Typewriter,
};

use super::{AsyncRequest, AsyncResult};

/// Output sink that forwards appends to the UI thread
pub(super) struct ChannelSink {
    surface: Surface,
    /// Clear epoch the output was produced for
    epoch: u64,
    result_tx: mpsc::UnboundedSender<AsyncResult>,
    ctx: egui::Context,
}

impl ChannelSink {
    pub(super) fn new(
        surface: Surface,
        epoch: u64,
        result_tx: mpsc::UnboundedSender<AsyncResult>,
        ctx: egui::Context,
    ) -> Self {
        Self {
            surface,
            epoch,
            result_tx,
            ctx,
        }
    }

    fn send(&self, result: AsyncResult) {
        if self.result_tx.send(result).is_err() {
            debug!("UI closed, dropping output for {:?}", self.surface);
        }
    }
}

impl OutputSink for ChannelSink {
    fn append(&mut self, ch: char) {
        self.send(AsyncResult::Append {
            surface: self.surface,
            epoch: self.epoch,
            ch,
        });
    }

    fn append_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.send(AsyncResult::AppendText {
            surface: self.surface,
            epoch: self.epoch,
            text: text.to_string(),
        });
    }

    fn scroll_to_end(&mut self) {
        // The log view sticks to the bottom; a repaint is enough
        self.ctx.request_repaint();
    }
}

/// Everything the loop owns besides its channels
pub struct OperationContext {
    pub module: Arc<dyn InterpreterModule>,
    pub dispatcher: CommandDispatcher,
    pub typewriter: Typewriter,
    pub script: StartupScript,
    pub cancel: CancelToken,
    /// Shared with the terminal view
    pub epoch: ClearEpoch,
    pub ctx: egui::Context,
}

/// Run the async operation processing loop
///
/// Runs for the lifetime of the application; ends when the UI drops its
/// request sender.
pub async fn async_operation_loop(
    request_rx: &mut mpsc::UnboundedReceiver<AsyncRequest>,
    result_tx: mpsc::UnboundedSender<AsyncResult>,
    mut op: OperationContext,
) {
    info!("Starting async operation loop");

    while let Some(request) = request_rx.recv().await {
        match request {
            AsyncRequest::Bootstrap => {
                if op.dispatcher.is_ready() {
                    warn!("Ignoring repeated bootstrap request");
                    continue;
                }
                info!("Processing Bootstrap request");
                bootstrap(&mut op, &result_tx).await;
            }
            AsyncRequest::Dispatch { command, epoch } => {
                debug!("Processing Dispatch: {:?}", command);
                let response = op.dispatcher.dispatch(&command).await;
                if epoch == op.epoch.current() {
                    let mut sink =
                        ChannelSink::new(Surface::Log, epoch, result_tx.clone(), op.ctx.clone());
                    op.typewriter.play(&mut sink, &response, &op.cancel).await;
                } else {
                    debug!("Screen cleared since {:?} was submitted, skipping its output", command);
                }
                let _ = result_tx.send(AsyncResult::ResponseFinished);
            }
            AsyncRequest::Evaluate(code) => {
                debug!("Processing Evaluate: {:?}", code);
                let result = op.dispatcher.evaluate_raw(&code);
                let _ = result_tx.send(AsyncResult::ScratchpadResult { code, result });
            }
        }
        op.ctx.request_repaint();
    }

    info!("Async operation loop ended");
}

/// Initialize the interpreter and play the startup animation
async fn bootstrap(op: &mut OperationContext, result_tx: &mpsc::UnboundedSender<AsyncResult>) {
    let epoch = op.epoch.current();
    let mut banner = ChannelSink::new(Surface::Banner, epoch, result_tx.clone(), op.ctx.clone());
    let mut instructions =
        ChannelSink::new(Surface::Instructions, epoch, result_tx.clone(), op.ctx.clone());

    let ready_tx = result_tx.clone();
    let result = run_startup(
        op.module.as_ref(),
        &op.typewriter,
        &op.script,
        &mut banner,
        &mut instructions,
        &op.cancel,
        move || {
            let _ = ready_tx.send(AsyncResult::SessionReady);
        },
    )
    .await;

    match result {
        Ok(session) => {
            op.dispatcher.attach(session);
            info!("Terminal ready for input");
            let _ = result_tx.send(AsyncResult::InteractiveReady);
        }
        Err(e) => {
            error!("Interpreter startup failed: {}", e);
            error!("{}", tysonterm::handle_startup_error(&e));
            let _ = result_tx.send(AsyncResult::StartupFailed(e.to_string()));
        }
    }
}
