//! specwatch CLI library.
//!
//! Configuration loading, argument parsing and the command implementations
//! behind the `specwatch` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
