//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Check commands borrow the
//! [`Runtime`](crate::runtime::Runtime) and settings the dispatcher built, so
//! each can be driven with a test double.

pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod dist_info;
pub mod fetch;
pub mod modules;
pub mod sqlite;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
