//! Android SDK command-line tools and SDK packages.

use std::path::{Path, PathBuf};

use crate::download::download_and_extract;
use crate::ui::UserInterface;

use super::{Dependency, InstallOutcome, Probe, SetupContext, Tally};

/// Packages installed through `sdkmanager`.
pub const SDK_PACKAGES: &[&str] = &[
    "platform-tools",
    "platforms;android-30",
    "build-tools;30.0.3",
    "emulator",
    "ndk-bundle",
];

/// Lines that expose the SDK to new shells.
pub const ANDROID_PROFILE_LINES: &[&str] = &[
    r#"export ANDROID_SDK_ROOT="$HOME/Library/Android/sdk""#,
    r#"export PATH="$ANDROID_SDK_ROOT/cmdline-tools/latest/bin:$ANDROID_SDK_ROOT/platform-tools:$PATH""#,
];

/// `~/Library/Android/sdk`
pub fn sdk_root(home: &Path) -> PathBuf {
    home.join("Library").join("Android").join("sdk")
}

/// The Android SDK.
pub struct AndroidSdk;

impl AndroidSdk {
    pub fn presence(home: &Path) -> Probe {
        Probe::Path(sdk_root(home))
    }
}

impl Dependency for AndroidSdk {
    fn name(&self) -> &str {
        "Android SDK"
    }

    fn probe(&self, ctx: &SetupContext<'_>) -> bool {
        Self::presence(&ctx.home).check(ctx.runner)
    }

    fn present_message(&self) -> String {
        "Android SDK is already set up.".to_string()
    }

    fn install(&self, ctx: &SetupContext<'_>, ui: &mut dyn UserInterface) -> InstallOutcome {
        let mut tally = Tally::new();
        // sdkmanager expects to live in cmdline-tools/latest
        let latest = ctx.android_sdk_root().join("cmdline-tools").join("latest");

        ui.message("Downloading Android SDK command line tools...");
        let result = download_and_extract(
            ctx.downloader,
            &ctx.toolchain.android_cmdline_tools_url,
            &latest,
        );
        tally.check(
            ui,
            result,
            "Failed to download and extract Android SDK command line tools",
        );

        let result = ctx.profile.append_lines(ANDROID_PROFILE_LINES);
        tally.check(ui, result, "Failed to configure Android SDK in the shell profile");

        let sdkmanager = sdkmanager_path(&latest);
        ui.message("Installing Android SDK packages...");
        for &package in SDK_PACKAGES {
            let result = ctx.runner.run(&sdkmanager, &["--install", package]);
            tally.check(
                ui,
                result,
                &format!("Failed to install SDK package {}", package),
            );
        }

        tally.outcome()
    }
}

/// The extracted `sdkmanager`, or the bare name when it isn't there.
fn sdkmanager_path(latest: &Path) -> String {
    let path = latest.join("bin").join("sdkmanager");
    if path.is_file() {
        path.to_string_lossy().into_owned()
    } else {
        "sdkmanager".to_string()
    }
}
