//! Configuration loading.
//!
//! - [`env_file`] - dotenv-style `.config` parser
//! - [`toolchain`] - required tool versions and download locations

pub mod env_file;
pub mod toolchain;

pub use env_file::EnvFileParser;
pub use toolchain::{ToolchainConfig, CONFIG_FILE_NAME};
