//! Authorization checks
//!
//! Every mutating registry operation calls one of these at the top, before
//! any other validation, so unauthorized calls fail cheaply and with no
//! state mutation.

use crate::RegistryError;
use attestor_domain::{Actor, IdentityId, Role};

/// Require that the actor holds `role`
pub(crate) fn require_role(actor: &Actor, role: Role) -> Result<(), RegistryError> {
    if actor.has_role(role) {
        return Ok(());
    }
    Err(RegistryError::NotAuthorized {
        actor: actor.id.clone(),
        required: role.as_str().to_string(),
    })
}

/// Require that the actor is the identity itself or holds admin
pub(crate) fn require_self_or_admin(
    actor: &Actor,
    identity: &IdentityId,
) -> Result<(), RegistryError> {
    if actor.id == *identity || actor.has_role(Role::Admin) {
        return Ok(());
    }
    Err(RegistryError::NotAuthorized {
        actor: actor.id.clone(),
        required: "self or admin".to_string(),
    })
}
