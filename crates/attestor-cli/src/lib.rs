//! Attestor CLI - command-line interface for the identity/claims registry.
//!
//! Drives the registry library in-process against a SQLite database. A
//! TOML profile (`~/.attestor/config.toml`) supplies the database path,
//! the acting identity and its roles, the required-topic set, and the
//! trusted issuer entries loaded into the in-memory directory at startup.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
