//! Info command implementation.

use super::open;
use crate::cli::InfoArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use attestor_domain::IdentityId;

/// Execute the info command.
pub fn execute_info(args: InfoArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (registry, store, _) = open(config)?;

    let id = IdentityId::parse(&args.id).map_err(CliError::InvalidInput)?;
    let info = registry.identity_info(&store, &id)?;
    println!("{}", formatter.info(&id, &info));
    Ok(())
}
