//! NVM and the Node.js version it manages.

use std::path::{Path, PathBuf};

use crate::ui::UserInterface;

use super::homebrew::run_script;
use super::{Dependency, InstallOutcome, Probe, SetupContext, Tally};

/// Lines that load nvm from `nvm_dir` in new shells.
///
/// A directory under `home` is written relative to `$HOME`.
pub fn nvm_profile_lines(home: &Path, nvm_dir: &Path) -> Vec<String> {
    let dir = match nvm_dir.strip_prefix(home) {
        Ok(relative) => format!("$HOME/{}", relative.display()),
        Err(_) => nvm_dir.display().to_string(),
    };
    vec![
        format!(r#"export NVM_DIR="{}""#, dir),
        r#"[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh""#.to_string(),
        r#"[ -s "$NVM_DIR/bash_completion" ] && \. "$NVM_DIR/bash_completion""#.to_string(),
    ]
}

/// Resolve the nvm directory: `$NVM_DIR` when set, else `~/.nvm`.
pub fn nvm_dir<F>(home: &Path, env_fn: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    env_fn("NVM_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(".nvm"))
}

/// The Node Version Manager.
///
/// nvm is a shell function rather than a binary, so the loader script in
/// the nvm directory counts as presence too.
pub struct Nvm;

impl Nvm {
    pub fn presence(nvm_dir: &Path) -> Probe {
        Probe::Any(vec![
            Probe::executable("nvm"),
            Probe::Path(nvm_dir.join("nvm.sh")),
        ])
    }
}

impl Dependency for Nvm {
    fn name(&self) -> &str {
        "NVM"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence(&ctx.nvm_dir).check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();

        ui.message("Installing NVM...");
        let result = run_script(ctx, &ctx.toolchain.nvm_install_script_url, "bash");
        tally.check(ui, result, "Failed to install NVM");

        let result = ctx
            .profile
            .append_lines(nvm_profile_lines(&ctx.home, &ctx.nvm_dir));
        tally.check(ui, result, "Failed to configure NVM in the shell profile");

        tally.outcome()
    }
}

/// Node.js, installed and selected through nvm.
pub struct Node;

impl Node {
    pub fn presence() -> Probe {
        Probe::executable("node")
    }
}

impl Dependency for Node {
    fn name(&self) -> &str {
        "Node.js"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence().check(ctx.runner)
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();
        let version = ctx.toolchain.require_node();
        let Some(version) = tally.check(ui, version, "Failed to install Node.js") else {
            return tally.outcome();
        };

        ui.message(&format!("Installing Node.js {} using NVM...", version));
        let steps = [
            (
                format!("nvm install {}", version),
                "Failed to install Node.js using NVM".to_string(),
            ),
            (
                format!("nvm alias default {}", version),
                "Failed to set default Node.js version".to_string(),
            ),
            (
                format!("nvm use {}", version),
                format!("Failed to use Node.js version {}", version),
            ),
        ];
        for (script, context) in steps {
            let result = ctx.run_sourced(&script);
            tally.check(ui, result, &context);
        }

        tally.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{
        home, sourced_line, toolchain, BytesDownloader, OfflineDownloader,
    };
    use super::*;
    use crate::config::ToolchainConfig;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn nvm_dir_prefers_environment() {
        let home = Path::new("/Users/dev");
        assert_eq!(nvm_dir(home, |_| None), PathBuf::from("/Users/dev/.nvm"));
        assert_eq!(
            nvm_dir(home, |_| Some("/opt/nvm".into())),
            PathBuf::from("/opt/nvm")
        );
        assert_eq!(
            nvm_dir(home, |_| Some(String::new())),
            PathBuf::from("/Users/dev/.nvm")
        );
    }

    #[test]
    fn profile_lines_follow_nvm_dir() {
        let home = Path::new("/Users/dev");

        let lines = nvm_profile_lines(home, &home.join(".nvm"));
        assert_eq!(lines[0], r#"export NVM_DIR="$HOME/.nvm""#);
        assert_eq!(lines.len(), 3);

        let lines = nvm_profile_lines(home, Path::new("/opt/nvm"));
        assert_eq!(lines[0], r#"export NVM_DIR="/opt/nvm""#);
    }

    #[test]
    fn custom_nvm_dir_is_written_to_profile() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let downloader = BytesDownloader(b"#!/bin/bash\n".to_vec());
        let mut ctx = SetupContext::new(&runner, &downloader, &config, home.path());
        let custom = TempDir::new().unwrap();
        ctx.nvm_dir = custom.path().join("nvm");

        Nvm.ensure(&ctx, &mut MockUI::new());

        let profile = fs::read_to_string(home.path().join(".zshrc")).unwrap();
        assert!(profile.contains(&format!(r#"export NVM_DIR="{}""#, ctx.nvm_dir.display())));
        assert!(!profile.contains("$HOME/.nvm"));
    }

    #[test]
    fn nvm_loader_script_counts_as_installed() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let mut ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        ctx.nvm_dir = home.path().join(".nvm");

        assert!(!Nvm.probe(&ctx));
        fs::create_dir_all(&ctx.nvm_dir).unwrap();
        fs::write(ctx.nvm_dir.join("nvm.sh"), "nvm() { :; }\n").unwrap();
        assert!(Nvm.probe(&ctx));
    }

    #[test]
    fn nvm_install_runs_script_and_writes_profile() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let downloader = BytesDownloader(b"#!/bin/bash\n".to_vec());
        let mut ctx = SetupContext::new(&runner, &downloader, &config, home.path());
        ctx.nvm_dir = home.path().join(".nvm");
        let mut ui = MockUI::new();

        let outcome = Nvm.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(runner.ran("bash "));
        let profile = fs::read_to_string(home.path().join(".zshrc")).unwrap();
        assert!(profile.contains(r#"export NVM_DIR="$HOME/.nvm""#));
    }

    #[test]
    fn nvm_download_failure_still_configures_profile() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let mut ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        ctx.nvm_dir = home.path().join(".nvm");
        let mut ui = MockUI::new();

        let outcome = Nvm.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert!(ui.errors()[0].starts_with("Failed to install NVM: "));
        assert!(home.path().join(".zshrc").exists());
    }

    #[test]
    fn node_install_runs_nvm_commands_in_order() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        assert_eq!(Node.ensure(&ctx, &mut ui), InstallOutcome::Installed);

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].contains("nvm install 18.17.0"));
        assert!(calls[1].contains("nvm alias default 18.17.0"));
        assert!(calls[2].contains("nvm use 18.17.0"));
    }

    #[test]
    fn node_failures_are_counted_and_later_commands_run() {
        let home = home();
        let runner = MockRunner::new();
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        runner.fail(&sourced_line(&ctx, "nvm install 18.17.0"));
        let mut ui = MockUI::new();

        let outcome = Node.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert_eq!(runner.calls().len(), 3);
        assert!(ui.has_output("Failed to install Node.js using NVM"));
    }

    #[test]
    fn node_without_version_reports_missing_key() {
        let home = home();
        let runner = MockRunner::new();
        let config = ToolchainConfig::default();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        let outcome = Node.ensure(&ctx, &mut ui);

        assert_eq!(outcome, InstallOutcome::Incomplete { failures: 1 });
        assert!(ui.has_output("REQUIRED_NODE_VERSION"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn node_on_path_is_already_installed() {
        let home = home();
        let runner = MockRunner::new();
        runner.add_executable("node");
        let config = toolchain();
        let ctx = SetupContext::new(&runner, &OfflineDownloader, &config, home.path());
        let mut ui = MockUI::new();

        assert_eq!(Node.ensure(&ctx, &mut ui), InstallOutcome::AlreadyInstalled);
        assert!(ui.has_output("Node.js is already installed."));
    }
}
