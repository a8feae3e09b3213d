//! rbenv, the Ruby version it manages, and CocoaPods.

use crate::ui::UserInterface;

use super::{Dependency, InstallOutcome, Probe, SetupContext, Tally};

/// Lines that put rbenv shims on PATH in new shells.
pub const RBENV_PROFILE_LINES: &[&str] = &[
    r#"export PATH="$HOME/.rbenv/bin:$PATH""#,
    r#"eval "$(rbenv init - zsh)""#,
];

/// The rbenv version manager and its ruby-build plugin.
pub struct Rbenv;

impl Rbenv {
    pub fn presence() -> Probe {
        Probe::executable("rbenv")
    }
}

impl Dependency for Rbenv {
    fn name(&self) -> &str {
        "rbenv"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence().check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();

        ui.message("Installing rbenv...");
        let result = ctx.runner.run("brew", &["install", "rbenv"]);
        tally.check(ui, result, "Failed to install rbenv");

        ui.message("Installing ruby-build plugin for rbenv...");
        let result = ctx.runner.run("brew", &["install", "ruby-build"]);
        tally.check(ui, result, "Failed to install ruby-build");

        let result = ctx.profile.append_lines(RBENV_PROFILE_LINES);
        tally.check(ui, result, "Failed to configure rbenv in the shell profile");

        tally.outcome()
    }
}

/// The Ruby version named in `.config`, installed through rbenv.
pub struct Ruby;

impl Ruby {
    /// Health probe: any `ruby` on PATH.
    pub fn presence() -> Probe {
        Probe::executable("ruby")
    }
}

impl Dependency for Ruby {
    fn name(&self) -> &str {
        "Ruby"
    }

    /// Setup looks for the exact version under rbenv, since macOS ships
    /// its own `ruby`.
    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        match &ctx.toolchain.ruby_version {
            Some(version) => Probe::RbenvVersion(version.clone()).check(ctx.runner),
            None => false,
        }
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();
        let version = ctx.toolchain.require_ruby();
        let Some(version) = tally.check(ui, version, "Failed to install Ruby") else {
            return tally.outcome();
        };

        ui.message(&format!("Installing Ruby {} using rbenv...", version));
        let result = ctx.run_sourced(&format!("rbenv install {}", version));
        tally.check(ui, result, "Failed to install Ruby using rbenv");

        let result = ctx.run_sourced(&format!("rbenv global {}", version));
        tally.check(ui, result, "Failed to set global Ruby version");

        tally.outcome()
    }
}

/// The CocoaPods gem.
pub struct Cocoapods;

impl Cocoapods {
    pub fn presence() -> Probe {
        Probe::gem("cocoapods")
    }
}

impl Dependency for Cocoapods {
    fn name(&self) -> &str {
        "CocoaPods"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence().check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();
        ui.message("Installing CocoaPods...");
        let result = ctx.runner.run("sudo", &["gem", "install", "cocoapods"]);
        tally.check(ui, result, "Failed to install CocoaPods");
        tally.outcome()
    }
}
