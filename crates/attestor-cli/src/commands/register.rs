//! Register command implementation.

use super::open;
use crate::cli::RegisterArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use attestor_domain::IdentityId;

/// Execute the register command.
///
/// A single id registers directly; two or more run as a batch with
/// per-item failure isolation, and the persisted batch result is printed.
pub fn execute_register(args: RegisterArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (mut registry, mut store, actor) = open(config)?;

    if args.ids.len() == 1 {
        let id = IdentityId::parse(&args.ids[0]).map_err(CliError::InvalidInput)?;
        registry.register_identity(&mut store, &actor, &id)?;
        println!("{}", formatter.registered(&id));
        return Ok(());
    }

    let batch_id = registry.batch_register_identities(&mut store, &actor, &args.ids)?;
    let result = registry.get_batch_result(&store, batch_id)?;
    println!("{}", formatter.batch_summary(&result));
    Ok(())
}
