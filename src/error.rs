//! Error types for bob operations.
//!
//! This module defines [`BobError`], the error type used throughout the
//! crate, and a [`Result`] alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Only two errors ever end the process: a missing `.config` file and an
//! unresolvable home directory. Everything raised while probing or
//! installing is reported through the UI and the run moves on to the next
//! step.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bob operations.
#[derive(Debug, Error)]
pub enum BobError {
    /// The `.config` file was not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The `.config` file could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A setting needed by an installer is missing or empty.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The user's home directory could not be resolved.
    #[error("Failed to get home directory")]
    HomeDirNotFound,

    /// External command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command could not be started at all.
    #[error("Failed to start '{command}': {message}")]
    CommandSpawn { command: String, message: String },

    /// Download of a remote resource failed.
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// Zip archive could not be read or extracted.
    #[error("Failed to extract archive: {message}")]
    Archive { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bob operations.
pub type Result<T> = std::result::Result<T, BobError>;
