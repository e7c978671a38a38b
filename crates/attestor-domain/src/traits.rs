//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

use crate::batch::{BatchId, BatchResult};
use crate::claim::Claim;
use crate::identity::{IdentityId, IdentityRecord};
use crate::topic::ClaimTopic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for persisting identities, claims, and batch results
///
/// Implemented by the infrastructure layer (attestor-store). The store must
/// support point lookup by identity id and range/filter scans by
/// `expires_at` for the sweep and expiring-soon queries.
pub trait RegistryStore {
    /// Error type for store operations
    type Error;

    /// Insert or replace an identity record
    fn put_identity(&mut self, record: IdentityRecord) -> Result<(), Self::Error>;

    /// Get an identity record; `None` means never registered
    fn get_identity(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, Self::Error>;

    /// Insert or replace the claim for (identity, claim.topic)
    fn put_claim(&mut self, identity: &IdentityId, claim: Claim) -> Result<(), Self::Error>;

    /// Get the claim held by an identity for a topic
    fn get_claim(
        &self,
        identity: &IdentityId,
        topic: ClaimTopic,
    ) -> Result<Option<Claim>, Self::Error>;

    /// Remove the claim for (identity, topic); returns whether one existed
    fn remove_claim(
        &mut self,
        identity: &IdentityId,
        topic: ClaimTopic,
    ) -> Result<bool, Self::Error>;

    /// Claims with `expires_at <= cutoff`, at most `limit` of them.
    ///
    /// Scan order is deterministic: ascending `expires_at`, then identity
    /// id, then topic code. Sweep progress depends on this ordering.
    fn claims_due(
        &self,
        cutoff: u64,
        limit: usize,
    ) -> Result<Vec<(IdentityId, Claim)>, Self::Error>;

    /// Claims with `expires_at` in `[from, to]`, in scan order
    fn claims_expiring_between(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<(IdentityId, Claim)>, Self::Error>;

    /// Persist a batch result (immutable once written)
    fn put_batch_result(&mut self, result: BatchResult) -> Result<(), Self::Error>;

    /// Get a batch result by id
    fn get_batch_result(&self, id: BatchId) -> Result<Option<BatchResult>, Self::Error>;
}

/// Queried collaborator: which issuers may assert which claim topics.
///
/// Trust is consulted at call time on every issuance and during renewal
/// evaluation - never cached across calls, since trust can be revoked
/// between calls and that must be observed.
pub trait IssuerDirectory {
    /// Whether `issuer` is currently trusted to assert `topic`
    fn is_trusted_for(&self, issuer: &IdentityId, topic: ClaimTopic) -> bool;
}

/// Queried collaborator: the topic catalog and the global required-topic
/// set driving identity verification
pub trait TopicCatalog {
    /// Whether `topic` is part of this catalog
    fn contains(&self, topic: ClaimTopic) -> bool;

    /// Topics an identity must hold active claims for to be verified
    fn required_topics(&self) -> &[ClaimTopic];
}

/// Time source for the registry
///
/// All lifecycle decisions (expiry resolution, sweep cutoffs, verification
/// checks) read time through this trait so tests can control it.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch
    fn now(&self) -> u64;
}

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch")
            .as_secs()
    }
}

/// A manually advanced clock for tests and simulations
///
/// # Examples
///
/// ```
/// use attestor_domain::{Clock, ManualClock};
///
/// let clock = ManualClock::new(1000);
/// assert_eq!(clock.now(), 1000);
/// clock.advance(500);
/// assert_eq!(clock.now(), 1500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at `now`
    pub fn new(now: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advance by `secs`
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
