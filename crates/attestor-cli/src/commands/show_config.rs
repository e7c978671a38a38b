//! Config command implementation.

use crate::config::Config;
use crate::error::Result;

/// Print the resolved configuration as TOML.
pub fn execute_config(config: &Config) -> Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
