//! Error types for registry operations

use attestor_domain::{BatchId, ClaimTopic, IdentityId};
use thiserror::Error;

/// Errors that can occur during registry operations
///
/// Whole-call validation failures (bad batch size, bad config values,
/// unauthorized caller) are raised immediately and abort the call with no
/// partial effect. Per-item failures inside a batch are captured into the
/// batch result instead of raised.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Malformed or sentinel identity id
    #[error("Invalid identity id: {0}")]
    InvalidIdentity(String),

    /// Duplicate registration
    #[error("Identity already registered: {0}")]
    AlreadyRegistered(IdentityId),

    /// Identity was never registered
    #[error("Identity not found: {0}")]
    IdentityNotFound(IdentityId),

    /// No claim recorded for the (identity, topic) pair
    #[error("No claim for identity {identity} on topic {topic}")]
    ClaimNotFound {
        /// The queried identity
        identity: IdentityId,
        /// The queried topic
        topic: ClaimTopic,
    },

    /// No batch result recorded under the id
    #[error("Batch result not found: {0}")]
    BatchNotFound(BatchId),

    /// Role or ownership check failed
    #[error("Caller {actor} is not authorized: requires {required}")]
    NotAuthorized {
        /// The rejected caller
        actor: IdentityId,
        /// What the operation requires
        required: String,
    },

    /// The caller holds the issuer role but is not trusted for the topic
    #[error("Issuer {issuer} is not trusted for topic {topic}")]
    UntrustedIssuer {
        /// The rejected issuer
        issuer: IdentityId,
        /// The claim topic
        topic: ClaimTopic,
    },

    /// Topic outside the configured catalog
    #[error("Topic {0} is not in the catalog")]
    UnknownTopic(ClaimTopic),

    /// Batch input size outside the allowed bounds
    #[error("Batch size {0} is outside [1, 100]")]
    InvalidBatchSize(usize),

    /// Non-positive default expiration period
    #[error("Default expiration period must be positive")]
    InvalidPeriod,

    /// Non-positive renewal grace period
    #[error("Renewal grace period must be positive")]
    InvalidGracePeriod,

    /// Per-sweep claim limit outside the allowed bounds
    #[error("Batch expiration check limit {0} is outside [1, 100]")]
    InvalidBatchLimit(u32),

    /// Non-positive duration argument
    #[error("Duration must be positive")]
    InvalidDuration,

    /// Non-positive sweep work bound
    #[error("Sweep limit must be positive")]
    InvalidSweepLimit,

    /// Supplied expiry does not lie after issuance time
    #[error("Claim expiry {expires_at} is not after issuance {issued_at}")]
    InvalidExpiry {
        /// The rejected expiry timestamp
        expires_at: u64,
        /// The would-be issuance timestamp
        issued_at: u64,
    },

    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),
}

/// Coarse error taxonomy, useful for mapping to transport-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed identifiers, out-of-range sizes or config values
    InvalidInput,

    /// Role/ownership/trust check failed
    NotAuthorized,

    /// Identity, claim, or batch id absent
    NotFound,

    /// Duplicate registration
    AlreadyExists,

    /// Storage layer failure
    Storage,
}

impl RegistryError {
    /// Classify this error into the coarse taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidIdentity(_)
            | RegistryError::UnknownTopic(_)
            | RegistryError::InvalidBatchSize(_)
            | RegistryError::InvalidPeriod
            | RegistryError::InvalidGracePeriod
            | RegistryError::InvalidBatchLimit(_)
            | RegistryError::InvalidDuration
            | RegistryError::InvalidSweepLimit
            | RegistryError::InvalidExpiry { .. } => ErrorKind::InvalidInput,
            RegistryError::NotAuthorized { .. } | RegistryError::UntrustedIssuer { .. } => {
                ErrorKind::NotAuthorized
            }
            RegistryError::IdentityNotFound(_)
            | RegistryError::ClaimNotFound { .. }
            | RegistryError::BatchNotFound(_) => ErrorKind::NotFound,
            RegistryError::AlreadyRegistered(_) => ErrorKind::AlreadyExists,
            RegistryError::Store(_) => ErrorKind::Storage,
        }
    }
}
