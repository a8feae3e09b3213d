//! External process execution and shell environment.
//!
//! - [`command`] - spawn commands, streaming or capturing their output
//! - [`path`] - executable lookup on `PATH`
//! - [`profile`] - append-only shell startup file editing
//! - [`mock`] - recording runner for tests

pub mod command;
pub mod mock;
pub mod path;
pub mod profile;

pub use command::{
    display_command, execute, execute_quiet, execute_streaming, CommandOptions,
    CommandResult, CommandRunner, SystemRunner,
};
pub use mock::MockRunner;
pub use path::{find_executable, is_executable, parse_system_path, resolve_tool_path};
pub use profile::{ShellProfile, ShellType};
