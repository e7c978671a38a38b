//! Roles and actors - the capability model gating registry mutations

use crate::identity::IdentityId;

/// A capability role held by a caller
///
/// Every mutating registry operation is gated by one of these roles (plus
/// "self" for owner-initiated actions, which is the actor whose id equals
/// the target identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Configuration and ownership-override authority
    Admin,

    /// Registration and sweep authority
    Operator,

    /// Claim issuance authority (still subject to per-topic trust)
    Issuer,
}

impl Role {
    /// Get the role name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operator => "operator",
            Role::Issuer => "issuer",
        }
    }

    /// Parse a role from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "operator" => Some(Role::Operator),
            "issuer" => Some(Role::Issuer),
            _ => None,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller: an identity plus the roles it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The caller's identity
    pub id: IdentityId,

    roles: Vec<Role>,
}

impl Actor {
    /// Create an actor with an explicit role set
    pub fn new(id: IdentityId, roles: Vec<Role>) -> Self {
        Self { id, roles }
    }

    /// Create an admin actor
    pub fn admin(id: IdentityId) -> Self {
        Self::new(id, vec![Role::Admin])
    }

    /// Create an operator actor
    pub fn operator(id: IdentityId) -> Self {
        Self::new(id, vec![Role::Operator])
    }

    /// Create an issuer actor
    pub fn issuer(id: IdentityId) -> Self {
        Self::new(id, vec![Role::Issuer])
    }

    /// Whether this actor holds the given role
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// The roles this actor holds
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
