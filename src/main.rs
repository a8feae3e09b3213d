//! bob CLI entry point.

use std::process::ExitCode;

use bob::cli::{Cli, CommandDispatcher};
use bob::config::ToolchainConfig;
use bob::error::BobError;
use bob::ui::create_ui;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("bob=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bob=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("bob starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui();

    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            ui.error(&format!("Error: {}", BobError::from(e)));
            return ExitCode::from(1);
        }
    };

    let toolchain = match ToolchainConfig::load(&project_root) {
        Ok(config) => config,
        Err(e) => {
            ui.error(&format!("Error loading .config file: {}", e));
            return ExitCode::from(1);
        }
    };

    let Some(home) = dirs::home_dir() else {
        ui.error(&format!("Error: {}", BobError::HomeDirNotFound));
        return ExitCode::from(1);
    };

    let dispatcher = CommandDispatcher::new(project_root, home, toolchain);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
