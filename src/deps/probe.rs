//! Presence checks.
//!
//! A [`Probe`] answers one yes/no question about the machine: is a program
//! on `PATH`, does a package manager list a package, does a path exist.
//! Probes only run read-only query commands.

use std::path::PathBuf;

use crate::shell::CommandRunner;

/// A presence check for one tool, package or SDK path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Executable found on the search path.
    Executable(String),
    /// `brew list --formula <name>` succeeds and mentions the name.
    BrewFormula(String),
    /// `gem list <name>` succeeds and mentions the name.
    Gem(String),
    /// `rbenv versions --bare` lists the version.
    RbenvVersion(String),
    /// Command exits successfully.
    Succeeds { program: String, args: Vec<String> },
    /// Filesystem path exists.
    Path(PathBuf),
    /// Every inner probe passes.
    All(Vec<Probe>),
    /// At least one inner probe passes.
    Any(Vec<Probe>),
}

impl Probe {
    pub fn executable(name: &str) -> Self {
        Probe::Executable(name.to_string())
    }

    pub fn brew_formula(name: &str) -> Self {
        Probe::BrewFormula(name.to_string())
    }

    pub fn gem(name: &str) -> Self {
        Probe::Gem(name.to_string())
    }

    pub fn succeeds(program: &str, args: &[&str]) -> Self {
        Probe::Succeeds {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Run the check.
    pub fn check(&self, runner: &dyn CommandRunner) -> bool {
        let present = match self {
            Probe::Executable(name) => runner.which(name).is_some(),
            Probe::BrewFormula(name) => {
                listing_contains(runner, "brew", &["list", "--formula", name.as_str()], name)
            }
            Probe::Gem(name) => listing_contains(runner, "gem", &["list", name.as_str()], name),
            Probe::RbenvVersion(version) => runner
                .capture("rbenv", &["versions", "--bare"])
                .map(|out| out.lines().any(|l| l.trim() == version))
                .unwrap_or(false),
            Probe::Succeeds { program, args } => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                runner.capture(program, &args).is_ok()
            }
            Probe::Path(path) => path.exists(),
            Probe::All(probes) => probes.iter().all(|p| p.check(runner)),
            Probe::Any(probes) => probes.iter().any(|p| p.check(runner)),
        };
        tracing::debug!("Probe {:?}: {}", self, present);
        present
    }
}

fn listing_contains(runner: &dyn CommandRunner, program: &str, args: &[&str], name: &str) -> bool {
    runner
        .capture(program, args)
        .map(|out| out.contains(name))
        .unwrap_or(false)
}
