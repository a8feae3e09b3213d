//! Read-only health report over every toolchain component.

use std::path::Path;

use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::android::AndroidSdk;
use super::homebrew::{Homebrew, HomebrewPackages};
use super::ios::XcodeTools;
use super::node::{Node, Nvm};
use super::ruby::{Cocoapods, Rbenv, Ruby};
use super::Probe;

/// One line of the health report.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Shown while the probe runs.
    pub label: String,
    /// Printed when the probe passes.
    pub present: String,
    /// Printed when it fails.
    pub absent: String,
    pub probe: Probe,
}

impl HealthCheck {
    /// "`<label>` is installed." / "`<label>` is not installed."
    pub fn installed(label: &str, probe: Probe) -> Self {
        Self {
            label: label.to_string(),
            present: format!("{} is installed.", label),
            absent: format!("{} is not installed.", label),
            probe,
        }
    }

    fn plural(label: &str, subject: &str, probe: Probe) -> Self {
        Self {
            label: label.to_string(),
            present: format!("{} are installed.", subject),
            absent: format!("{} are not installed.", subject),
            probe,
        }
    }
}

/// The checks `health` runs, in order.
pub fn health_checks(home: &Path, nvm_dir: &Path, jdk_version: Option<&str>) -> Vec<HealthCheck> {
    vec![
        HealthCheck::installed("Homebrew", Homebrew::presence()),
        HealthCheck::plural(
            "Homebrew packages",
            "Required Homebrew packages",
            HomebrewPackages::presence(jdk_version),
        ),
        HealthCheck::installed("NVM", Nvm::presence(nvm_dir)),
        HealthCheck::installed("Node.js", Node::presence()),
        HealthCheck::installed("Rbenv", Rbenv::presence()),
        HealthCheck::installed("Ruby", Ruby::presence()),
        HealthCheck::installed("CocoaPods", Cocoapods::presence()),
        HealthCheck::installed("Android environment", AndroidSdk::presence(home)),
        HealthCheck::installed("iOS environment", XcodeTools::environment()),
    ]
}

/// Outcome of a health run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub passed: usize,
    pub total: usize,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.passed == self.total
    }
}

/// Run every check, one spinner line each.
pub fn run_health(
    checks: &[HealthCheck],
    runner: &dyn CommandRunner,
    ui: &mut dyn UserInterface,
) -> HealthReport {
    let mut passed = 0;
    for check in checks {
        let mut spinner = ui.start_spinner(&format!("Checking {}", check.label));
        if check.probe.check(runner) {
            passed += 1;
            spinner.finish_success(&check.present);
        } else {
            spinner.finish_error(&check.absent);
        }
    }

    HealthReport {
        passed,
        total: checks.len(),
    }
}
