//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::ToolchainConfig;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    home: PathBuf,
    toolchain: ToolchainConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher for a project directory and home directory.
    pub fn new(project_root: PathBuf, home: PathBuf, toolchain: ToolchainConfig) -> Self {
        Self {
            project_root,
            home,
            toolchain,
        }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Setup => {
                let cmd = super::setup::SetupCommand::new(&self.home, self.toolchain.clone());
                cmd.execute(ui)
            }
            Commands::Health => {
                let cmd = super::health::HealthCommand::new(&self.home, self.toolchain.clone());
                cmd.execute(ui)
            }
            Commands::Build(args) => {
                let cmd = super::build::BuildCommand::new(&self.project_root, args.target);
                cmd.execute(ui)
            }
        }
    }
}
