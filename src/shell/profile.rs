//! Shell startup file editing.
//!
//! Installers make tools available to future shells by appending lines to
//! the user's startup file. Appends are not deduplicated: running setup
//! twice writes the same lines twice.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Shells whose startup files bob knows how to source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Unknown,
}

impl ShellType {
    /// Infer the shell from a startup file name.
    pub fn from_profile(path: &Path) -> Self {
        match path.file_name().and_then(|n| n.to_str()).unwrap_or("") {
            ".zshrc" | ".zprofile" | ".zshenv" => ShellType::Zsh,
            ".bashrc" | ".bash_profile" => ShellType::Bash,
            _ => ShellType::Unknown,
        }
    }

    /// Program used to run scripts for this shell.
    pub fn program(self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Unknown => "sh",
        }
    }
}

/// A shell startup file such as `~/.zshrc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProfile {
    path: PathBuf,
}

impl ShellProfile {
    /// Wrap an arbitrary startup file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The zsh startup file under `home`.
    pub fn zshrc(home: &Path) -> Self {
        Self::new(home.join(".zshrc"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shell that reads this file.
    pub fn shell(&self) -> ShellType {
        ShellType::from_profile(&self.path)
    }

    /// Append raw text, creating the file if needed.
    pub fn append(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(content.as_bytes())?;
        tracing::debug!("Appended {} byte(s) to {}", content.len(), self.path.display());
        Ok(())
    }

    /// Append each line followed by a newline.
    pub fn append_lines<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        self.append(&content)
    }

    /// Program and arguments that run `script` after sourcing this file.
    ///
    /// A child process can't change the parent's environment, so tools
    /// configured by the profile (nvm, rbenv) are driven through a fresh
    /// shell that loads it first.
    pub fn sourced_command(&self, script: &str) -> (&'static str, Vec<String>) {
        let shell = self.shell();
        let source = match shell {
            ShellType::Unknown => ".",
            ShellType::Bash | ShellType::Zsh => "source",
        };
        let wrapped = format!(
            "{} '{}' >/dev/null 2>&1; {}",
            source,
            self.path.display(),
            script
        );
        (shell.program(), vec!["-c".to_string(), wrapped])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn append_creates_file() {
        let temp = TempDir::new().unwrap();
        let profile = ShellProfile::zshrc(temp.path());

        profile.append("export A=1\n").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(".zshrc")).unwrap(),
            "export A=1\n"
        );
    }

    #[test]
    fn append_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".zshrc");
        fs::write(&path, "alias ll='ls -l'\n").unwrap();

        ShellProfile::new(&path).append_lines(["export B=2"]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "alias ll='ls -l'\nexport B=2\n"
        );
    }

    #[test]
    fn appending_same_line_twice_duplicates_it() {
        let temp = TempDir::new().unwrap();
        let profile = ShellProfile::zshrc(temp.path());
        let line = "export ANDROID_SDK_ROOT=/sdk";

        profile.append_lines([line]).unwrap();
        profile.append_lines([line]).unwrap();

        let content = fs::read_to_string(profile.path()).unwrap();
        assert_eq!(content.matches(line).count(), 2);
    }

    #[test]
    fn append_lines_terminates_each_line() {
        let temp = TempDir::new().unwrap();
        let profile = ShellProfile::zshrc(temp.path());

        profile
            .append_lines(vec!["rbenv() {".to_string(), "esac }".to_string()])
            .unwrap();

        assert_eq!(
            fs::read_to_string(profile.path()).unwrap(),
            "rbenv() {\nesac }\n"
        );
    }

    #[test]
    fn shell_type_from_profile_name() {
        assert_eq!(
            ShellType::from_profile(Path::new("/home/u/.zshrc")),
            ShellType::Zsh
        );
        assert_eq!(
            ShellType::from_profile(Path::new("/home/u/.bashrc")),
            ShellType::Bash
        );
        assert_eq!(
            ShellType::from_profile(Path::new("/home/u/.profile")),
            ShellType::Unknown
        );
    }

    #[test]
    fn sourced_command_loads_profile_first() {
        let profile = ShellProfile::new("/home/u/.zshrc");

        let (program, args) = profile.sourced_command("nvm install 18");

        assert_eq!(program, "zsh");
        assert_eq!(args[0], "-c");
        assert!(args[1].starts_with("source '/home/u/.zshrc'"));
        assert!(args[1].ends_with("nvm install 18"));
    }

    #[test]
    fn sourced_command_uses_dot_for_unknown_shell() {
        let profile = ShellProfile::new("/home/u/.profile");
        let (program, args) = profile.sourced_command("true");
        assert_eq!(program, "sh");
        assert!(args[1].starts_with(". "));
    }
}
