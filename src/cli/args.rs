//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};

/// bob - Mobile development environment bootstrapper.
#[derive(Debug, Parser)]
#[command(name = "bob")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install every missing toolchain dependency
    Setup,

    /// Report which toolchain dependencies are installed
    Health,

    /// Build the app for a platform
    Build(BuildArgs),
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BuildArgs {
    #[command(subcommand)]
    pub target: BuildTarget,
}

/// Platforms `build` knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum BuildTarget {
    /// Release build of the Android app (gradle)
    Android,

    /// Release build of the iOS app (CocoaPods + xcodebuild)
    Ios,
}
