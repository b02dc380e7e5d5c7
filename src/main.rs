//! TysonTerm - a GUI terminal front-end for the TysonLang interpreter
//!
//! Opens a window with a simulated terminal and a scratchpad, both talking to
//! one interpreter session.

mod app;

use std::env;
use std::path::PathBuf;
use std::process;

use eframe::egui;
use tracing::{debug, error, info, warn};

use tysonterm::config::RuntimeConfig;
use tysonterm::error::{Error, Result};

use app::TysonTermApp;

/// Application configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug mode
    debug: bool,
    /// Interpreter command override
    interpreter: Option<String>,
    /// Library directory override
    library_dir: Option<PathBuf>,
    /// Window width
    width: Option<f32>,
    /// Window height
    height: Option<f32>,
}

/// What the command line asked for
#[derive(Debug)]
enum Invocation {
    Run(AppArgs),
    Help,
    Version,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Invocation> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Invocation> {
        let args: Vec<String> = args.into_iter().collect();
        let mut app_args = AppArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    app_args.config_path = Some(PathBuf::from(value(&args, i, "config file path")?));
                    i += 1;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--interpreter" | "-i" => {
                    app_args.interpreter = Some(value(&args, i, "interpreter command")?.to_string());
                    i += 1;
                }
                "--library-dir" | "-l" => {
                    app_args.library_dir = Some(PathBuf::from(value(&args, i, "library directory")?));
                    i += 1;
                }
                "--width" | "-w" => {
                    if i + 1 < args.len() {
                        app_args.width = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--height" | "-h" => {
                    if i + 1 < args.len() {
                        app_args.height = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--help" | "-?" => return Ok(Invocation::Help),
                "--version" | "-v" => return Ok(Invocation::Version),
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown option: {}", arg).into());
                }
                _ => {
                    warn!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(Invocation::Run(app_args))
    }
}

/// Value following the option at `i`
fn value<'a>(args: &'a [String], i: usize, what: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::Other(format!("Missing {}", what)))
}

/// Print help information
fn print_help() {
    println!("TysonTerm - a GUI terminal for the TysonLang interpreter");
    println!();
    println!("USAGE:");
    println!("    tysonterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>        Path to configuration file");
    println!("    -d, --debug                Enable debug mode");
    println!("    -i, --interpreter <CMD>    Interpreter executable (default: tysonlang)");
    println!("    -l, --library-dir <DIR>    Directory holding std.tyson");
    println!("    -w, --width <WIDTH>        Initial window width");
    println!("    -h, --height <HEIGHT>      Initial window height");
    println!("    -?, --help                 Print this help message");
    println!("    -v, --version              Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    TysonTerm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. <config dir>/tysonterm/config.toml");
    println!("    3. $XDG_CONFIG_HOME/tysonterm/config.toml");
    println!("    4. ~/.tysonterm/config.toml");
    println!("    5. ./.tysonterm/config.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    TYSONTERM_CONFIG       Path to configuration file");
    println!("    TYSONTERM_DEBUG        Enable debug mode (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn main() -> Result<()> {
    // Parse command line arguments first
    let args = match AppArgs::parse() {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Invocation::Version) => {
            println!("TysonTerm v{}", tysonterm::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Failed to parse arguments: {}", e);
            print_help();
            process::exit(1);
        }
    };

    // Initialize logging based on debug flag
    let debug_env = env::var("TYSONTERM_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_level = if args.debug || debug_env { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Starting TysonTerm v{}", tysonterm::VERSION);
    debug!("Debug mode enabled");

    // Load configuration
    let runtime_config = load_configuration(&args);

    // Set up native options
    let native_options = create_native_options(&args);

    info!("Initializing GUI...");
    if let Err(e) = eframe::run_native(
        "TysonTerm",
        native_options,
        Box::new(move |cc| {
            let app = TysonTermApp::new(&cc.egui_ctx, runtime_config)?;
            Ok(Box::new(app))
        }),
    ) {
        error!("Application failed: {}", e);
        process::exit(1);
    }

    info!("TysonTerm shutdown complete");
    Ok(())
}

/// Load configuration from file or use defaults, then apply overrides
fn load_configuration(args: &AppArgs) -> RuntimeConfig {
    info!("Loading configuration...");

    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("TYSONTERM_CONFIG").ok().map(PathBuf::from));

    let mut runtime_config = match &config_path {
        Some(path) => match tysonterm::init_with_config(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {}", path.display(), e);
                info!("Falling back to default configuration");
                RuntimeConfig::with_defaults()
            }
        },
        None => tysonterm::init(),
    };

    apply_overrides(&mut runtime_config, args);
    debug!("Configuration loaded successfully");
    runtime_config
}

/// Apply command-line overrides to the loaded configuration
fn apply_overrides(runtime_config: &mut RuntimeConfig, args: &AppArgs) {
    let interpreter = &mut runtime_config.config_mut().interpreter;

    if let Some(command) = &args.interpreter {
        debug!("Interpreter override: {}", command);
        interpreter.command = command.clone();
    }
    if let Some(dir) = &args.library_dir {
        debug!("Library directory override: {}", dir.display());
        interpreter.library_dir = Some(dir.clone());
    }
}

/// Create native options for the application window
fn create_native_options(args: &AppArgs) -> eframe::NativeOptions {
    info!("Setting up window...");

    let mut options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TysonTerm")
            .with_app_id("tysonterm")
            .with_icon(std::sync::Arc::new(create_window_icon()))
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    // Apply window size overrides
    let size = match (args.width, args.height) {
        (Some(width), Some(height)) => Some([width, height]),
        (Some(width), None) => Some([width, 640.0]),
        (None, Some(height)) => Some([1024.0, height]),
        (None, None) => None,
    };
    if let Some(size) = size {
        options.viewport = options.viewport.with_inner_size(size);
    }

    options.viewport = options.viewport.with_resizable(true);
    options.renderer = eframe::Renderer::Glow;

    debug!("Window setup complete");
    options
}

/// Create window icon: a prompt chevron and cursor bar on a dark tile
fn create_window_icon() -> egui::IconData {
    let mut rgba = Vec::with_capacity(32 * 32 * 4);

    let bg_color = [18, 18, 26, 255];
    let fg_color = [120, 230, 120, 255];

    for y in 0..32i32 {
        for x in 0..32i32 {
            // ">" made of two diagonal strokes meeting at (14, 16)
            let upper = y <= 16 && ((y - 8) - (x - 6)).abs() <= 1;
            let lower = y >= 16 && ((y - 24) + (x - 6)).abs() <= 1;
            let chevron = (6..=14).contains(&x) && (upper || lower);
            let cursor = (17..=26).contains(&x) && (22..=24).contains(&y);
            let pixel = if chevron || cursor { fg_color } else { bg_color };
            rgba.extend_from_slice(&pixel);
        }
    }

    egui::IconData {
        rgba,
        width: 32,
        height: 32,
    }
}
