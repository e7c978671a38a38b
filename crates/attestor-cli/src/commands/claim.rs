//! Add-claim command implementation.

use super::open;
use crate::cli::AddClaimArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use attestor_domain::{ClaimTopic, IdentityId};
use attestor_registry::ClaimRequest;

/// Execute the add-claim command.
pub fn execute_add_claim(args: AddClaimArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (mut registry, mut store, actor) = open(config)?;

    let identity = IdentityId::parse(&args.identity).map_err(CliError::InvalidInput)?;
    let topic = ClaimTopic::parse(&args.topic)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown claim topic: {}", args.topic)))?;

    let claim = registry.add_claim(
        &mut store,
        &actor,
        &ClaimRequest {
            identity: identity.clone(),
            topic,
            data: args.data.into_bytes(),
            expires_at: args.expires_at,
            auto_renewal: args.auto_renew,
        },
    )?;

    println!("{}", formatter.claim_added(topic, &identity, claim.expires_at));
    Ok(())
}
