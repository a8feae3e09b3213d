//! Toolchain dependencies: probes, installers and the health report.
//!
//! Each dependency knows how to tell whether it is present and how to
//! install itself. [`run_setup`] walks the fixed list in order and never
//! stops early: a failed step is reported and the next one runs.

pub mod android;
pub mod health;
pub mod homebrew;
pub mod ios;
pub mod node;
pub mod probe;
pub mod ruby;
pub mod setup;

pub use health::{health_checks, run_health, HealthCheck, HealthReport};
pub use probe::Probe;
pub use setup::{run_setup, setup_steps, SetupReport};

use std::path::{Path, PathBuf};

use crate::config::ToolchainConfig;
use crate::download::Downloader;
use crate::error::Result;
use crate::shell::{CommandRunner, ShellProfile};
use crate::ui::UserInterface;

/// Everything an installer may touch.
pub struct SetupContext<'a> {
    /// Runs and queries external programs.
    pub runner: &'a dyn CommandRunner,
    /// Fetches install scripts and archives.
    pub downloader: &'a dyn Downloader,
    /// Required versions and download locations.
    pub toolchain: &'a ToolchainConfig,
    /// The user's home directory.
    pub home: PathBuf,
    /// Where nvm lives (`$NVM_DIR`, default `~/.nvm`).
    pub nvm_dir: PathBuf,
    /// Where an existing Homebrew install would live.
    pub homebrew_prefix: PathBuf,
    /// Startup file that receives PATH and loader lines.
    pub profile: ShellProfile,
}

impl<'a> SetupContext<'a> {
    /// Build a context for `home`, resolving `NVM_DIR` from the environment.
    pub fn new(
        runner: &'a dyn CommandRunner,
        downloader: &'a dyn Downloader,
        toolchain: &'a ToolchainConfig,
        home: &Path,
    ) -> Self {
        let nvm_dir = node::nvm_dir(home, |key| std::env::var(key).ok());
        Self {
            runner,
            downloader,
            toolchain,
            home: home.to_path_buf(),
            nvm_dir,
            homebrew_prefix: PathBuf::from(homebrew::HOMEBREW_PREFIX),
            profile: ShellProfile::zshrc(home),
        }
    }

    /// Android SDK root (`~/Library/Android/sdk`).
    pub fn android_sdk_root(&self) -> PathBuf {
        android::sdk_root(&self.home)
    }

    /// Run `script` in a shell that has sourced the profile first.
    pub fn run_sourced(&self, script: &str) -> Result<()> {
        let (shell, args) = self.profile.sourced_command(script);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run(shell, &args)
    }
}

/// How a single setup step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The probe passed; nothing was installed.
    AlreadyInstalled,
    /// Every sub-step succeeded.
    Installed,
    /// Some sub-steps failed and were reported.
    Incomplete { failures: usize },
}

impl InstallOutcome {
    pub fn failures(self) -> usize {
        match self {
            InstallOutcome::Incomplete { failures } => failures,
            _ => 0,
        }
    }
}

/// Counts failed sub-steps inside one installer.
///
/// Every failure is shown to the user and logged, then the installer moves
/// on to its next sub-step.
#[derive(Debug, Default)]
pub struct Tally {
    failures: usize,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `result` if it failed, prefixed with `context`.
    pub fn check<T>(
        &mut self,
        ui: &mut dyn UserInterface,
        result: Result<T>,
        context: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.failures += 1;
                tracing::warn!("{}: {}", context, e);
                ui.error(&format!("{}: {}", context, e));
                None
            }
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    /// `Installed` when nothing failed, `Incomplete` otherwise.
    pub fn outcome(self) -> InstallOutcome {
        if self.failures == 0 {
            InstallOutcome::Installed
        } else {
            InstallOutcome::Incomplete {
                failures: self.failures,
            }
        }
    }
}

/// One toolchain component that setup can install.
pub trait Dependency {
    /// Name shown to the user.
    fn name(&self) -> &str;

    /// Whether the dependency is already present.
    fn probe(&self, ctx: &SetupContext<'_>) -> bool;

    /// Install the dependency, reporting failed sub-steps through `ui`.
    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome;

    /// Line printed when the probe passes.
    fn present_message(&self) -> String {
        format!("{} is already installed.", self.name())
    }

    /// Probe, then install only when absent.
    fn ensure(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        if self.probe(ctx) {
            ui.message(&self.present_message());
            InstallOutcome::AlreadyInstalled
        } else {
            self.install(ctx, ui)
        }
    }
}
