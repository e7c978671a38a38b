//! Identity module - registered entities and their records

use std::fmt;

/// The all-zero address-style id, rejected as a sentinel value.
const ZERO_SENTINEL: &str = "0x0000000000000000000000000000000000000000";

/// Opaque unique key for an identity (an address-like string).
///
/// Ids are validated at the boundary: empty/whitespace strings and the
/// all-zero sentinel are rejected. Once registered, an id is never reused.
///
/// # Examples
///
/// ```
/// use attestor_domain::IdentityId;
///
/// let id = IdentityId::parse("0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B").unwrap();
/// assert_eq!(id.as_str(), "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B");
///
/// assert!(IdentityId::parse("").is_err());
/// assert!(IdentityId::parse("0x0000000000000000000000000000000000000000").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityId(String);

impl IdentityId {
    /// Parse and validate an identity id
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("identity id must not be empty".to_string());
        }
        if Self::is_zero_sentinel(s) {
            return Err(format!("identity id '{}' is the zero sentinel", s));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_zero_sentinel(s: &str) -> bool {
        if s == ZERO_SENTINEL {
            return true;
        }
        // Any 0x-prefixed id consisting only of zeros is a sentinel
        s.len() > 2
            && (s.starts_with("0x") || s.starts_with("0X"))
            && s[2..].chars().all(|c| c == '0')
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for IdentityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The registration record for one identity.
///
/// Existence is represented by presence in the store: `get_identity`
/// returning `None` means the identity was never registered. Records are
/// never physically deleted; claims expire independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// The identity's unique id
    pub id: IdentityId,

    /// When this identity was registered (seconds since Unix epoch)
    pub registered_at: u64,

    /// Identity-level auto-renewal opt-in, settable by the identity's
    /// representative or an admin. Defaults to true at registration.
    pub auto_renewal: bool,
}

impl IdentityRecord {
    /// Create a new registration record with auto-renewal enabled
    pub fn new(id: IdentityId, registered_at: u64) -> Self {
        Self {
            id,
            registered_at,
            auto_renewal: true,
        }
    }
}
