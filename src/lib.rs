//! bob - Mobile development environment bootstrapper.
//!
//! bob checks for and installs the toolchain a React Native project needs
//! on macOS: Homebrew, a JDK and gradle, nvm and Node.js, rbenv and Ruby,
//! CocoaPods, the Android SDK and the Xcode command line tools.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.config` loading and toolchain versions
//! - [`deps`] - Probes, installers and the health report
//! - [`download`] - HTTP downloads and zip extraction
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Command execution and shell profile editing
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use bob::deps::{health_checks, run_health};
//! use bob::shell::MockRunner;
//! use bob::ui::MockUI;
//! use std::path::Path;
//!
//! let home = Path::new("/nonexistent/home");
//! let checks = health_checks(home, &home.join(".nvm"), Some("17"));
//! let runner = MockRunner::new();
//! runner.add_executable("brew");
//!
//! let mut ui = MockUI::new();
//! let report = run_health(&checks, &runner, &mut ui);
//! assert_eq!(report.passed, 1);
//! assert!(ui.has_output("Homebrew is installed."));
//! ```

pub mod cli;
pub mod config;
pub mod deps;
pub mod download;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{BobError, Result};
