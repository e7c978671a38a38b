//! Verify command implementation.

use super::open;
use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use attestor_domain::IdentityId;

/// Execute the verify command.
pub fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (registry, store, _) = open(config)?;

    let mut ids = Vec::with_capacity(args.ids.len());
    for raw in &args.ids {
        ids.push(IdentityId::parse(raw).map_err(CliError::InvalidInput)?);
    }

    let verified = registry.batch_check_verification(&store, &ids)?;
    for (id, flag) in ids.iter().zip(verified) {
        println!("{}", formatter.verification(id, flag));
    }
    Ok(())
}
