//! Startup sequence
//!
//! Brings the interpreter session up and plays the opening animation:
//! `init`, pause, banner, pause, instructions. The caller makes the view
//! interactive once [`run_startup`] returns a session; on error the view is
//! left as it is.

use std::time::Duration;

use tokio::time::sleep;

use super::typewriter::{CancelToken, OutputSink, Typewriter};
use crate::config::Config;
use crate::error::Result;
use crate::interpreter::{InterpreterModule, InterpreterSession};

/// Text and timing of the opening animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupScript {
    pub banner: String,
    pub instructions: String,
    /// Wait before the banner and again before the instructions
    pub pause: Duration,
}

impl StartupScript {
    pub fn from_config(config: &Config) -> Self {
        Self {
            banner: config.ui.banner.clone(),
            instructions: config.ui.instructions.clone(),
            pause: config.typewriter.startup_pause(),
        }
    }
}

/// Initialize the interpreter and animate the banner and instructions.
///
/// `on_ready` runs as soon as `init` succeeds, before any animation. Nothing
/// is animated when `init` fails.
pub async fn run_startup<B, I, F>(
    module: &dyn InterpreterModule,
    typewriter: &Typewriter,
    script: &StartupScript,
    banner: &mut B,
    instructions: &mut I,
    cancel: &CancelToken,
    on_ready: F,
) -> Result<Box<dyn InterpreterSession>>
where
    B: OutputSink + ?Sized,
    I: OutputSink + ?Sized,
    F: FnOnce(),
{
    info!("Initializing interpreter module '{}'", module.name());
    let session = module.init()?;
    debug!("Interpreter session ready");
    on_ready();

    sleep(script.pause).await;
    typewriter.play(banner, &script.banner, cancel).await;

    sleep(script.pause).await;
    typewriter.play(instructions, &script.instructions, cancel).await;

    Ok(session)
}
