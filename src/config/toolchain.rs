//! Toolchain settings.
//!
//! Required tool versions come from the `.config` file in the working
//! directory. As with a dotenv loader, variables already present in the
//! process environment take precedence over the file.

use crate::error::{BobError, Result};
use std::collections::HashMap;
use std::path::Path;

use super::env_file::EnvFileParser;

/// Name of the settings file read at startup.
pub const CONFIG_FILE_NAME: &str = ".config";

/// NVM install script (pinned release).
pub const DEFAULT_NVM_INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/nvm-sh/nvm/v0.39.1/install.sh";

/// Android SDK command-line tools archive.
pub const DEFAULT_ANDROID_CMDLINE_TOOLS_URL: &str =
    "https://dl.google.com/android/repository/commandlinetools-mac-7583922_latest.zip";

/// Homebrew install script.
pub const DEFAULT_HOMEBREW_INSTALL_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

pub const NODE_VERSION_KEY: &str = "REQUIRED_NODE_VERSION";
pub const JDK_VERSION_KEY: &str = "REQUIRED_JDK_VERSION";
pub const RUBY_VERSION_KEY: &str = "REQUIRED_RUBY_VERSION";
pub const NVM_URL_KEY: &str = "NVM_INSTALL_SCRIPT_URL";
pub const ANDROID_TOOLS_URL_KEY: &str = "ANDROID_CMDLINE_TOOLS_URL";
pub const HOMEBREW_URL_KEY: &str = "HOMEBREW_INSTALL_SCRIPT_URL";

/// Versions and download locations used by the installers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// Node.js version installed through nvm.
    pub node_version: Option<String>,
    /// JDK major version installed as `openjdk@<version>`.
    pub jdk_version: Option<String>,
    /// Ruby version installed through rbenv.
    pub ruby_version: Option<String>,
    pub homebrew_install_script_url: String,
    pub nvm_install_script_url: String,
    pub android_cmdline_tools_url: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            node_version: None,
            jdk_version: None,
            ruby_version: None,
            homebrew_install_script_url: DEFAULT_HOMEBREW_INSTALL_SCRIPT_URL.to_string(),
            nvm_install_script_url: DEFAULT_NVM_INSTALL_SCRIPT_URL.to_string(),
            android_cmdline_tools_url: DEFAULT_ANDROID_CMDLINE_TOOLS_URL.to_string(),
        }
    }
}

impl ToolchainConfig {
    /// Load `.config` from `dir`, overlaid with the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BobError::ConfigNotFound`] when the file is missing.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let vars = EnvFileParser::load(&path)?;
        tracing::debug!("Loaded {} variable(s) from {}", vars.len(), path.display());
        Ok(Self::from_vars(&vars, |key| std::env::var(key).ok()))
    }

    /// Build settings from file variables and an environment lookup.
    ///
    /// The lookup wins over the file. Empty values count as unset.
    pub fn from_vars<F>(file_vars: &HashMap<String, String>, env_fn: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            env_fn(key)
                .or_else(|| file_vars.get(key).cloned())
                .filter(|v| !v.trim().is_empty())
        };

        let defaults = Self::default();
        Self {
            node_version: get(NODE_VERSION_KEY),
            jdk_version: get(JDK_VERSION_KEY),
            ruby_version: get(RUBY_VERSION_KEY),
            homebrew_install_script_url: get(HOMEBREW_URL_KEY)
                .unwrap_or(defaults.homebrew_install_script_url),
            nvm_install_script_url: get(NVM_URL_KEY)
                .unwrap_or(defaults.nvm_install_script_url),
            android_cmdline_tools_url: get(ANDROID_TOOLS_URL_KEY)
                .unwrap_or(defaults.android_cmdline_tools_url),
        }
    }

    /// The Node.js version, or an error naming the missing key.
    pub fn require_node(&self) -> Result<&str> {
        required(self.node_version.as_deref(), NODE_VERSION_KEY)
    }

    /// The JDK version, or an error naming the missing key.
    pub fn require_jdk(&self) -> Result<&str> {
        required(self.jdk_version.as_deref(), JDK_VERSION_KEY)
    }

    /// The Ruby version, or an error naming the missing key.
    pub fn require_ruby(&self) -> Result<&str> {
        required(self.ruby_version.as_deref(), RUBY_VERSION_KEY)
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    value.ok_or_else(|| BobError::ConfigValidationError {
        message: format!("{} is not set in {}", key, CONFIG_FILE_NAME),
    })
}
