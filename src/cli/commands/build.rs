//! `bob build android|ios`

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::BuildTarget;
use crate::cli::commands::{Command, CommandResult};
use crate::deps::Tally;
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Release build of the app in the current project.
pub struct BuildCommand {
    project_root: PathBuf,
    target: BuildTarget,
}

impl BuildCommand {
    pub fn new(project_root: &Path, target: BuildTarget) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            target,
        }
    }

    pub fn run_with(
        &self,
        runner: &dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        let built = match self.target {
            BuildTarget::Android => self.build_android(runner, ui),
            BuildTarget::Ios => self.build_ios(runner, ui),
        };
        tracing::debug!("Build {:?} succeeded: {}", self.target, built);
        CommandResult::success()
    }

    fn build_android(&self, runner: &dyn CommandRunner, ui: &mut dyn UserInterface) -> bool {
        let dir = self.project_root.join("android");
        if !dir.is_dir() {
            ui.error(&format!("No android directory in {}", self.project_root.display()));
            return false;
        }

        ui.message("Building Android release...");
        let gradlew = dir.join("gradlew").to_string_lossy().into_owned();
        let mut tally = Tally::new();
        let result = runner.run_in(&dir, &gradlew, &["assembleRelease"]);
        tally.check(ui, result, "Failed to build the Android app");

        finish(ui, tally, "Android build complete.")
    }

    fn build_ios(&self, runner: &dyn CommandRunner, ui: &mut dyn UserInterface) -> bool {
        let dir = self.project_root.join("ios");
        if !dir.is_dir() {
            ui.error(&format!("No ios directory in {}", self.project_root.display()));
            return false;
        }

        let mut tally = Tally::new();
        ui.message("Installing pods...");
        let result = runner.run_in(&dir, "pod", &["install"]);
        tally.check(ui, result, "Failed to install pods");

        let Some(workspace) = find_workspace(&dir) else {
            ui.error(&format!("No Xcode workspace found in {}", dir.display()));
            return false;
        };
        let scheme = workspace.trim_end_matches(".xcworkspace").to_string();

        ui.message(&format!("Building {} (Release)...", scheme));
        let result = runner.run_in(
            &dir,
            "xcodebuild",
            &[
                "-workspace",
                workspace.as_str(),
                "-scheme",
                scheme.as_str(),
                "-configuration",
                "Release",
                "build",
            ],
        );
        tally.check(ui, result, "Failed to build the iOS app");

        finish(ui, tally, "iOS build complete.")
    }
}

fn finish(ui: &mut dyn UserInterface, tally: Tally, done: &str) -> bool {
    if tally.failures() == 0 {
        ui.success(done);
        true
    } else {
        false
    }
}

/// First `*.xcworkspace` in `dir`, by name.
fn find_workspace(dir: &Path) -> Option<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".xcworkspace") && name.len() > ".xcworkspace".len())
        .collect();
    names.sort();
    names.into_iter().next()
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        Ok(self.run_with(&SystemRunner, ui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn android_runs_gradle_in_android_dir() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("android")).unwrap();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let result =
            BuildCommand::new(project.path(), BuildTarget::Android).run_with(&runner, &mut ui);

        assert_eq!(result.exit_code, 0);
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].ends_with("android/gradlew assembleRelease"));
        assert_eq!(
            runner.call_dirs(),
            vec![Some(project.path().join("android"))]
        );
        assert!(ui.has_output("Android build complete."));
    }

    #[test]
    fn missing_android_dir_is_reported() {
        let project = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        let result =
            BuildCommand::new(project.path(), BuildTarget::Android).run_with(&runner, &mut ui);

        assert_eq!(result.exit_code, 0);
        assert!(runner.calls().is_empty());
        assert!(ui.errors()[0].starts_with("No android directory"));
    }

    #[test]
    fn gradle_failure_is_reported() {
        let project = TempDir::new().unwrap();
        let android = project.path().join("android");
        fs::create_dir(&android).unwrap();
        let runner = MockRunner::new();
        let gradlew = android.join("gradlew").to_string_lossy().into_owned();
        runner.fail(&format!("{} assembleRelease", gradlew));
        let mut ui = MockUI::new();

        BuildCommand::new(project.path(), BuildTarget::Android).run_with(&runner, &mut ui);

        assert!(ui.errors()[0].starts_with("Failed to build the Android app: "));
        assert!(!ui.has_output("Android build complete."));
    }

    #[test]
    fn ios_installs_pods_then_builds_workspace() {
        let project = TempDir::new().unwrap();
        let ios = project.path().join("ios");
        fs::create_dir_all(ios.join("MyApp.xcworkspace")).unwrap();
        fs::create_dir_all(ios.join("MyApp.xcodeproj")).unwrap();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        BuildCommand::new(project.path(), BuildTarget::Ios).run_with(&runner, &mut ui);

        assert_eq!(
            runner.calls(),
            vec![
                "pod install".to_string(),
                "xcodebuild -workspace MyApp.xcworkspace -scheme MyApp -configuration Release build"
                    .to_string(),
            ]
        );
        assert!(runner.call_dirs().iter().all(|d| d.as_deref() == Some(ios.as_path())));
        assert!(ui.has_output("iOS build complete."));
    }

    #[test]
    fn ios_without_workspace_stops_after_pods() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("ios")).unwrap();
        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        BuildCommand::new(project.path(), BuildTarget::Ios).run_with(&runner, &mut ui);

        assert_eq!(runner.calls(), vec!["pod install".to_string()]);
        assert!(ui.has_output("No Xcode workspace found"));
    }

    #[test]
    fn find_workspace_picks_first_by_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Zeta.xcworkspace")).unwrap();
        fs::create_dir(dir.path().join("Alpha.xcworkspace")).unwrap();
        fs::write(dir.path().join("Podfile"), "").unwrap();

        assert_eq!(
            find_workspace(dir.path()),
            Some("Alpha.xcworkspace".to_string())
        );
    }
}
