//! Homebrew and the formulae installed through it.

use crate::error::Result;
use crate::ui::UserInterface;

use super::{Dependency, InstallOutcome, Probe, SetupContext, Tally};

/// Default Homebrew prefix on Apple silicon.
pub const HOMEBREW_PREFIX: &str = "/opt/homebrew";

/// The `brew` package manager.
pub struct Homebrew;

impl Homebrew {
    pub fn presence() -> Probe {
        Probe::executable("brew")
    }
}

impl Dependency for Homebrew {
    fn name(&self) -> &str {
        "Homebrew"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence().check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        if ctx.homebrew_prefix.exists() {
            ui.warning(&format!(
                "Homebrew found at {} but brew is not on PATH.",
                ctx.homebrew_prefix.display()
            ));
            return InstallOutcome::AlreadyInstalled;
        }

        ui.message("Installing Homebrew...");
        let mut tally = Tally::new();
        let result = run_script(ctx, &ctx.toolchain.homebrew_install_script_url, "/bin/bash");
        tally.check(ui, result, "Failed to install Homebrew");
        tally.outcome()
    }
}

/// Download an install script and run it with `shell`.
pub(crate) fn run_script(ctx: &SetupContext<'_>, url: &str, shell: &str) -> Result<()> {
    let script = ctx.downloader.fetch(url)?;
    let path = script.path().to_string_lossy().into_owned();
    tracing::debug!("Running {} downloaded from {}", path, url);
    ctx.runner.run(shell, &[&path])
}

/// Formulae required by the Android build.
pub struct HomebrewPackages;

impl HomebrewPackages {
    /// JDK formula for a version, or plain `openjdk` when none is set.
    pub fn jdk_formula(version: Option<&str>) -> String {
        match version {
            Some(v) => format!("openjdk@{}", v),
            None => "openjdk".to_string(),
        }
    }

    /// Probe over every formula, for the health report.
    pub fn presence(jdk_version: Option<&str>) -> Probe {
        Probe::All(vec![
            Probe::BrewFormula(Self::jdk_formula(jdk_version)),
            Probe::brew_formula("gradle"),
        ])
    }

    fn install_formula(
        ctx: &SetupContext<'_>,
        ui: &mut dyn UserInterface,
        formula: &str,
        tally: &mut Tally,
    ) -> bool {
        if Probe::brew_formula(formula).check(ctx.runner) {
            ui.message(&format!("{} is already installed.", formula));
            return false;
        }
        ui.message(&format!("Installing {}...", formula));
        let result = ctx.runner.run("brew", &["install", formula]);
        tally.check(ui, result, &format!("Failed to install {}", formula));
        true
    }
}

impl Dependency for HomebrewPackages {
    fn name(&self) -> &str {
        "Homebrew packages"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence(ctx.toolchain.jdk_version.as_deref()).check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();
        let mut attempted = false;

        let jdk = ctx.toolchain.require_jdk();
        if let Some(version) = tally.check(ui, jdk, "Failed to install the JDK") {
            let formula = Self::jdk_formula(Some(version));
            attempted |= Self::install_formula(ctx, ui, &formula, &mut tally);
        }
        attempted |= Self::install_formula(ctx, ui, "gradle", &mut tally);

        if !attempted && tally.failures() == 0 {
            InstallOutcome::AlreadyInstalled
        } else {
            tally.outcome()
        }
    }

    /// Packages are checked one by one so each gets its own line.
    fn ensure(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        self.install(ctx, ui)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{home, toolchain, BytesDownloader, OfflineDownloader};
    use super::*;
    use crate::config::ToolchainConfig;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;

    #[test]
    fn homebrew_present_is_not_reinstalled() {
        let home = home();
        let runner = MockRunner::new();
        runner.add_executable("brew");
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        assert_eq!(Homebrew.ensure(&ctx, &mut ui), InstallOutcome::AlreadyInstalled);
        assert!(ui.has_output("Homebrew is already installed."));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn existing_prefix_without_brew_is_not_reported_as_installed() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let mut ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        ctx.homebrew_prefix = home.path().to_path_buf();
        let mut ui = MockUI::new();

        let outcome = Homebrew.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::AlreadyInstalled);
        assert!(ui.warnings()[0].contains("brew is not on PATH"));
        assert!(ui.successes().is_empty());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn homebrew_script_failure_is_reported() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let mut ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        ctx.homebrew_prefix = home.path().join("homebrew");
        let mut ui = MockUI::new();

        let outcome = Homebrew.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert!(ui.errors()[0].starts_with("Failed to install Homebrew: "));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn homebrew_script_runs_with_bash() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let downloader = BytesDownloader(b"echo brew".to_vec());
        let mut ctx = SetupContext::new(&runner, &downloader, &config, home.path());
        ctx.homebrew_prefix = home.path().join("homebrew");
        let mut ui = MockUI::new();

        assert_eq!(Homebrew.ensure(&ctx, &mut ui), InstallOutcome::Installed);
        assert!(runner.ran("/bin/bash "));
    }

    #[test]
    fn jdk_formula_names() {
        assert_eq!(HomebrewPackages::jdk_formula(Some("17")), "openjdk@17");
        assert_eq!(HomebrewPackages::jdk_formula(None), "openjdk");
    }

    #[test]
    fn installs_only_missing_formulae() {
        let home = home();
        let runner = MockRunner::new();
        runner.set_output("brew list --formula gradle", "gradle/8.5/bin/gradle\n");
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        let outcome = HomebrewPackages.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(runner.ran("brew install openjdk@17"));
        assert!(!runner.ran("brew install gradle"));
        assert!(ui.has_output("gradle is already installed."));
    }

    #[test]
    fn installed_formulae_pass_probe_on_rerun() {
        let home = home();
        let runner = MockRunner::new();
        runner.installs_output(
            "brew install openjdk@17",
            "brew list --formula openjdk@17",
            "openjdk@17/17.0.9/bin/java\n",
        );
        runner.installs_output(
            "brew install gradle",
            "brew list --formula gradle",
            "gradle/8.5/bin/gradle\n",
        );
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());

        assert!(!HomebrewPackages.probe(&ctx));
        HomebrewPackages.ensure(&ctx, &mut MockUI::new());
        assert!(HomebrewPackages.probe(&ctx));

        let mut ui = MockUI::new();
        assert_eq!(
            HomebrewPackages.ensure(&ctx, &mut ui),
            InstallOutcome::AlreadyInstalled
        );
        assert!(ui.has_output("openjdk@17 is already installed."));
    }

    #[test]
    fn failed_formula_does_not_stop_the_next() {
        let home = home();
        let runner = MockRunner::new();
        runner.fail("brew install openjdk@17");
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        let outcome = HomebrewPackages.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert!(runner.ran("brew install gradle"));
        assert!(ui.has_output("Failed to install openjdk@17"));
    }

    #[test]
    fn missing_jdk_version_still_installs_gradle() {
        let home = home();
        let runner = MockRunner::new();
        let config = ToolchainConfig::default();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        let outcome = HomebrewPackages.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert!(ui.has_output("REQUIRED_JDK_VERSION"));
        assert!(runner.ran("brew install gradle"));
        assert!(!runner.ran("brew install openjdk"));
    }
}
