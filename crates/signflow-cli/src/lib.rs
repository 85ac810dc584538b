//! Signflow CLI library.
//!
//! Configuration profiles, command execution and output formatting for the
//! `signflow` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, Profile};
pub use error::{CliError, Result};
pub use output::Formatter;
