//! `bob setup`

use std::path::{Path, PathBuf};

use crate::cli::commands::{Command, CommandResult};
use crate::config::ToolchainConfig;
use crate::deps::{run_setup, setup_steps, SetupContext};
use crate::download::{Downloader, HttpDownloader};
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Installs whatever the toolchain is missing.
///
/// Step failures are printed and never change the exit code.
pub struct SetupCommand {
    home: PathBuf,
    toolchain: ToolchainConfig,
}

impl SetupCommand {
    pub fn new(home: &Path, toolchain: ToolchainConfig) -> Self {
        Self {
            home: home.to_path_buf(),
            toolchain,
        }
    }

    /// Run setup against the given runner and downloader.
    pub fn run_with(
        &self,
        runner: &dyn CommandRunner,
        downloader: &dyn Downloader,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        ui.message("Setting up development environment...");

        let ctx = SetupContext::new(runner, downloader, &self.toolchain, &self.home);
        let report = run_setup(&setup_steps(), &ctx, ui);
        tracing::debug!(
            "Setup finished: {} step(s), {} failure(s)",
            report.steps.len(),
            report.total_failures()
        );

        CommandResult::success()
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let downloader = HttpDownloader::new()?;
        Ok(self.run_with(&SystemRunner, &downloader, ui))
    }
}
