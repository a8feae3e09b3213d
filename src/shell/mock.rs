//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every command line, answers captured queries from canned output,
//! and can make an install command "provide" a tool so that later probes
//! see it.
//!
//! # Example
//!
//! ```
//! use bob::shell::{CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.add_executable("brew");
//! runner.installs_executable("brew install rbenv", "rbenv");
//!
//! assert!(runner.which("rbenv").is_none());
//! runner.run("brew", &["install", "rbenv"]).unwrap();
//! assert!(runner.which("rbenv").is_some());
//! assert_eq!(runner.calls(), vec!["brew install rbenv".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{BobError, Result};

use super::command::{display_command, CommandRunner};

/// Side effect applied when a streamed command succeeds.
#[derive(Debug, Clone)]
enum Effect {
    Executable(String),
    Output { query: String, output: String },
}

#[derive(Debug, Default)]
struct MockState {
    executables: HashSet<String>,
    outputs: HashMap<String, String>,
    failing: HashSet<String>,
    failing_programs: HashSet<String>,
    effects: HashMap<String, Vec<Effect>>,
    calls: Vec<String>,
    dirs: Vec<Option<PathBuf>>,
}

/// Recording [`CommandRunner`] for tests.
#[derive(Debug, Default)]
pub struct MockRunner {
    state: RefCell<MockState>,
}

impl MockRunner {
    /// Create a runner with nothing installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program` resolvable via [`CommandRunner::which`].
    pub fn add_executable(&self, program: &str) {
        self.state
            .borrow_mut()
            .executables
            .insert(program.to_string());
    }

    /// Answer a captured command line with `output`.
    pub fn set_output(&self, command: &str, output: &str) {
        self.state
            .borrow_mut()
            .outputs
            .insert(command.to_string(), output.to_string());
    }

    /// Make an exact command line fail with exit code 1.
    pub fn fail(&self, command: &str) {
        self.state.borrow_mut().failing.insert(command.to_string());
    }

    /// Make every invocation of `program` fail to spawn.
    pub fn fail_program(&self, program: &str) {
        self.state
            .borrow_mut()
            .failing_programs
            .insert(program.to_string());
    }

    /// When `command` succeeds, `program` becomes resolvable.
    pub fn installs_executable(&self, command: &str, program: &str) {
        self.add_effect(command, Effect::Executable(program.to_string()));
    }

    /// When `command` succeeds, `query` starts answering with `output`.
    pub fn installs_output(&self, command: &str, query: &str, output: &str) {
        self.add_effect(
            command,
            Effect::Output {
                query: query.to_string(),
                output: output.to_string(),
            },
        );
    }

    fn add_effect(&self, command: &str, effect: Effect) {
        self.state
            .borrow_mut()
            .effects
            .entry(command.to_string())
            .or_default()
            .push(effect);
    }

    /// Every command line seen, in order, streamed and captured alike.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Working directories passed to each call (None when not set).
    pub fn call_dirs(&self) -> Vec<Option<PathBuf>> {
        self.state.borrow().dirs.clone()
    }

    /// Whether any recorded call starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.state
            .borrow()
            .calls
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    fn record(&self, program: &str, args: &[&str], dir: Option<&Path>) -> Result<String> {
        let line = display_command(program, args);
        let mut state = self.state.borrow_mut();
        state.calls.push(line.clone());
        state.dirs.push(dir.map(Path::to_path_buf));

        if state.failing_programs.contains(program) {
            return Err(BobError::CommandSpawn {
                command: line,
                message: "No such file or directory (os error 2)".to_string(),
            });
        }
        if state.failing.contains(&line) {
            return Err(BobError::CommandFailed {
                command: line,
                code: Some(1),
            });
        }
        Ok(line)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        self.run_dir(None, program, args)
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        self.run_dir(Some(dir), program, args)
    }

    fn capture(&self, program: &str, args: &[&str]) -> Result<String> {
        let line = self.record(program, args, None)?;
        let state = self.state.borrow();
        state
            .outputs
            .get(&line)
            .cloned()
            .ok_or(BobError::CommandFailed {
                command: line,
                code: Some(1),
            })
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        self.state
            .borrow()
            .executables
            .contains(program)
            .then(|| PathBuf::from("/mock/bin").join(program))
    }
}

impl MockRunner {
    fn run_dir(&self, dir: Option<&Path>, program: &str, args: &[&str]) -> Result<()> {
        let line = self.record(program, args, dir)?;
        let mut state = self.state.borrow_mut();
        let effects = state.effects.get(&line).cloned().unwrap_or_default();
        for effect in effects {
            match effect {
                Effect::Executable(name) => {
                    state.executables.insert(name);
                }
                Effect::Output { query, output } => {
                    state.outputs.insert(query, output);
                }
            }
        }
        Ok(())
    }
}
