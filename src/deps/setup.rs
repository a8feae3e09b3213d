//! The setup sequence.

use crate::ui::UserInterface;

use super::android::AndroidSdk;
use super::homebrew::{Homebrew, HomebrewPackages};
use super::ios::XcodeTools;
use super::node::{Node, Nvm};
use super::ruby::{Cocoapods, Rbenv, Ruby};
use super::{Dependency, InstallOutcome, SetupContext};

/// Every dependency in install order.
pub fn setup_steps() -> Vec<Box<dyn Dependency>> {
    vec![
        Box::new(Homebrew),
        Box::new(HomebrewPackages),
        Box::new(Nvm),
        Box::new(Node),
        Box::new(Rbenv),
        Box::new(Ruby),
        Box::new(Cocoapods),
        Box::new(AndroidSdk),
        Box::new(XcodeTools),
    ]
}

/// What happened to each step of a setup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    pub steps: Vec<(String, InstallOutcome)>,
}

impl SetupReport {
    /// Names of steps that reported at least one failure.
    pub fn failed_steps(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|(_, outcome)| outcome.failures() > 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn total_failures(&self) -> usize {
        self.steps.iter().map(|(_, o)| o.failures()).sum()
    }
}

/// Run every step in order. A failing step never stops the ones after it.
pub fn run_setup(
    steps: &[Box<dyn Dependency>],
    ctx: &SetupContext<'_>,
    ui: &mut dyn UserInterface,
) -> SetupReport {
    let mut report = SetupReport::default();

    for step in steps {
        ui.show_header(step.name());
        let outcome = step.ensure(ctx, ui);
        tracing::debug!("{}: {:?}", step.name(), outcome);

        match outcome {
            InstallOutcome::AlreadyInstalled => {}
            InstallOutcome::Installed => ui.success(&format!("{} installed.", step.name())),
            InstallOutcome::Incomplete { failures } => ui.warning(&format!(
                "{} finished with {} error(s).",
                step.name(),
                failures
            )),
        }
        report.steps.push((step.name().to_string(), outcome));
    }

    ui.success("Development environment setup complete!");
    let failed = report.failed_steps();
    if !failed.is_empty() {
        ui.warning(&format!(
            "{} step(s) reported errors: {}",
            failed.len(),
            failed.join(", ")
        ));
    }

    report
}
