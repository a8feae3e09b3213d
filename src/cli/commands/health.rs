//! `bob health`

use std::path::{Path, PathBuf};

use crate::cli::commands::{Command, CommandResult};
use crate::config::ToolchainConfig;
use crate::deps::{health_checks, node, run_health};
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Reports which toolchain components are present. Changes nothing.
pub struct HealthCommand {
    home: PathBuf,
    nvm_dir: PathBuf,
    toolchain: ToolchainConfig,
}

impl HealthCommand {
    pub fn new(home: &Path, toolchain: ToolchainConfig) -> Self {
        Self {
            home: home.to_path_buf(),
            nvm_dir: node::nvm_dir(home, |key| std::env::var(key).ok()),
            toolchain,
        }
    }

    pub fn run_with(
        &self,
        runner: &dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        ui.show_header("Checking the health of the development environment...");

        let checks = health_checks(
            &self.home,
            &self.nvm_dir,
            self.toolchain.jdk_version.as_deref(),
        );
        let report = run_health(&checks, runner, ui);

        let summary = format!("{} of {} checks passed.", report.passed, report.total);
        if report.is_healthy() {
            ui.success(&summary);
        } else {
            ui.message(&summary);
        }

        CommandResult::success()
    }
}

impl Command for HealthCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        Ok(self.run_with(&SystemRunner, ui))
    }
}
