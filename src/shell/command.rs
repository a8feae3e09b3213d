//! External command execution.
//!
//! Commands are spawned directly (no intermediate shell) with an explicit
//! argument list. Output is either inherited so the user sees it live, or
//! captured and returned as one combined string for inspection.

use crate::error::{BobError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::path::find_executable;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Combined stdout and stderr. Empty when output was streamed.
    pub output: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command exited with status 0.
    pub success: bool,
}

impl CommandResult {
    /// Convert into the captured output, or a `CommandFailed` error.
    pub fn into_output(self, command: &str) -> Result<String> {
        if self.success {
            Ok(self.output)
        } else {
            Err(BobError::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
            })
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture output instead of inheriting the parent's streams.
    pub capture: bool,
}

/// Render a program and its arguments as a single readable line.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('\'');
            line.push_str(arg);
            line.push('\'');
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Execute a command.
///
/// A non-zero exit is not an error here; inspect [`CommandResult::success`].
/// Failure to spawn the process is.
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = display_command(program, args);
    tracing::debug!("Running: {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    let spawn_error = |e: std::io::Error| BobError::CommandSpawn {
        command: command_line.clone(),
        message: e.to_string(),
    };

    let (status, output) = if options.capture {
        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(spawn_error)?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        (output.status, combined)
    } else {
        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(spawn_error)?;
        (status, String::new())
    };

    let duration = start.elapsed();
    tracing::debug!(
        "Finished: {} (exit {:?}, {:?})",
        command_line,
        status.code(),
        duration
    );

    Ok(CommandResult {
        exit_code: status.code(),
        output,
        duration,
        success: status.success(),
    })
}

/// Execute with output streamed to the caller's terminal.
pub fn execute_streaming(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let options = CommandOptions {
        cwd: cwd.map(Path::to_path_buf),
        capture: false,
    };
    execute(program, args, &options)?.into_output(&display_command(program, args))?;
    Ok(())
}

/// Execute and return the combined output, failing on non-zero exit.
pub fn execute_quiet(program: &str, args: &[&str]) -> Result<String> {
    let options = CommandOptions {
        capture: true,
        ..Default::default()
    };
    execute(program, args, &options)?.into_output(&display_command(program, args))
}

/// Everything the probes and installers need from the operating system.
///
/// Production code uses [`SystemRunner`]; tests substitute
/// [`MockRunner`](super::MockRunner).
pub trait CommandRunner {
    /// Run a command with live output. Non-zero exit is an error.
    fn run(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Run a command with live output inside `dir`.
    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()>;

    /// Run a command and return its combined output. Non-zero exit is an error.
    fn capture(&self, program: &str, args: &[&str]) -> Result<String>;

    /// Locate an executable on the search path.
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// [`CommandRunner`] backed by real processes and the real `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        execute_streaming(program, args, None)
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        execute_streaming(program, args, Some(dir))
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        execute_quiet(program, args)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        find_executable(program)
    }
}
