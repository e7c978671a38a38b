//! Expiring command implementation.

use super::open;
use crate::cli::ExpiringArgs;
use crate::config::Config;
use crate::error::Result;

/// Execute the expiring command.
pub fn execute_expiring(args: ExpiringArgs, config: &Config) -> Result<()> {
    let (registry, store, _) = open(config)?;

    let expiring = registry.expiring_identities(&store, args.within)?;
    if expiring.is_empty() {
        println!("no claims expiring within {}s", args.within);
        return Ok(());
    }
    for id in expiring {
        println!("{}", id);
    }
    Ok(())
}
