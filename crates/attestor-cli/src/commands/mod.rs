//! Command implementations.

mod claim;
mod expiring;
mod info;
mod register;
mod show_config;
mod sweep;
mod verify;

pub use claim::execute_add_claim;
pub use expiring::execute_expiring;
pub use info::execute_info;
pub use register::execute_register;
pub use show_config::execute_config;
pub use sweep::execute_sweep;
pub use verify::execute_verify;

use crate::config::Config;
use crate::error::Result;
use attestor_domain::{Actor, StandardCatalog};
use attestor_registry::{IdentityRegistry, InMemoryIssuerDirectory};
use attestor_store::SqliteStore;

/// The registry instantiation the CLI drives.
pub type CliRegistry = IdentityRegistry<InMemoryIssuerDirectory, StandardCatalog>;

/// Build the registry, store, and acting identity from the profile.
pub(crate) fn open(config: &Config) -> Result<(CliRegistry, SqliteStore, Actor)> {
    let registry = IdentityRegistry::new(
        config.directory()?,
        config.catalog()?,
        config.expiration.clone(),
    )?;
    let store = SqliteStore::new(&config.database)?;
    let actor = config.actor()?;
    tracing::debug!(database = %config.database, actor = %actor.id, "registry opened");
    Ok((registry, store, actor))
}
