//! Command-line interface for bob.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{BuildArgs, BuildTarget, Cli, Commands};
pub use commands::{Command, CommandDispatcher, CommandResult};
