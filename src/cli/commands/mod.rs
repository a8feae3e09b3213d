//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed to by
//! [`CommandDispatcher`].

pub mod build;
pub mod dispatcher;
pub mod health;
pub mod setup;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
