//! Xcode command line tools.

use crate::ui::UserInterface;

use super::{Dependency, InstallOutcome, Probe, SetupContext, Tally};

/// Xcode command line tools and the Xcode license.
///
/// Unlike the other dependencies this step always does some work: present
/// tools are updated, and the license is accepted either way.
pub struct XcodeTools;

impl XcodeTools {
    /// Probe for installed command line tools (`xcode-select -p`).
    pub fn presence() -> Probe {
        Probe::succeeds("xcode-select", &["-p"])
    }

    /// Health probe for an iOS build environment.
    pub fn environment() -> Probe {
        Probe::All(vec![Probe::executable("xcodebuild"), Probe::executable("pod")])
    }

    fn accept_license(ctx: &SetupContext<'_>, ui: &mut dyn UserInterface, tally: &mut Tally) {
        ui.message("Accepting Xcode license...");
        let result = ctx.runner.run("sudo", &["xcodebuild", "-license", "accept"]);
        tally.check(ui, result, "Failed to accept Xcode license");
    }
}

impl Dependency for XcodeTools {
    fn name(&self) -> &str {
        "Xcode command line tools"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence().check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();

        ui.message("Installing Xcode command line tools...");
        if let Err(e) = ctx.runner.run("xcode-select", &["--install"]) {
            tracing::debug!("xcode-select --install: {}", e);
            ui.warning(
                "Xcode command line tools installation attempt failed, possibly already installed.",
            );
        }

        Self::accept_license(ctx, ui, &mut tally);
        tally.outcome()
    }

    fn ensure(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        if !self.probe(ctx) {
            return self.install(ctx, ui);
        }

        let mut tally = Tally::new();
        ui.message("Xcode command line tools are already installed. Checking for updates...");
        let result = ctx.runner.run("softwareupdate", &["--install", "-a"]);
        tally.check(ui, result, "Failed to update Xcode command line tools");

        Self::accept_license(ctx, ui, &mut tally);
        match tally.outcome() {
            InstallOutcome::Installed => InstallOutcome::AlreadyInstalled,
            incomplete => incomplete,
        }
    }
}
