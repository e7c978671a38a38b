//! Batch operations - multi-item registration, issuance, and verification
//! checks with per-item failure isolation
//!
//! The whole-batch size bound is atomic and fail-fast: an out-of-range
//! input rejects the entire call and no `BatchResult` is created. Per-item
//! business failures are NOT atomic across items - item i succeeding is
//! independent of item j failing; failures become entries in the persisted
//! `BatchResult` instead of aborting the batch.

use crate::access::require_role;
use crate::registry::{ClaimRequest, IdentityRegistry};
use crate::RegistryError;
use attestor_domain::traits::{IssuerDirectory, RegistryStore, TopicCatalog};
use attestor_domain::{
    Actor, BatchId, BatchOperation, BatchResult, IdentityId, RegistryEvent, Role,
};

/// Smallest accepted batch input
pub const MIN_BATCH_SIZE: usize = 1;

/// Largest accepted batch input; bounds the work a single call can do
pub const MAX_BATCH_SIZE: usize = 100;

/// Reject inputs outside `[MIN_BATCH_SIZE, MAX_BATCH_SIZE]` before any
/// item is touched
fn check_batch_size(len: usize) -> Result<(), RegistryError> {
    if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&len) {
        return Err(RegistryError::InvalidBatchSize(len));
    }
    Ok(())
}

impl<D: IssuerDirectory, C: TopicCatalog> IdentityRegistry<D, C> {
    /// Register up to 100 identities in one call. Operator-only.
    ///
    /// Takes raw id strings so malformed ids surface as per-item failures
    /// rather than rejecting the whole batch. Returns the id under which
    /// the persisted `BatchResult` is retrievable.
    pub fn batch_register_identities<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        ids: &[String],
    ) -> Result<BatchId, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_role(actor, Role::Operator)?;
        check_batch_size(ids.len())?;

        let mut result = BatchResult::new(BatchOperation::RegisterIdentities, ids.len());
        for (index, raw) in ids.iter().enumerate() {
            let item = IdentityId::parse(raw)
                .map_err(RegistryError::InvalidIdentity)
                .and_then(|id| self.register_unchecked(store, &id));
            match item {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(index, e.to_string()),
            }
        }

        self.finish_batch(store, result)
    }

    /// Issue up to 100 claims in one call. Issuer-only.
    ///
    /// Per-item authorization (issuer trusted for that topic), identity
    /// existence, and expiry validity apply individually.
    pub fn batch_add_claims<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        requests: &[ClaimRequest],
    ) -> Result<BatchId, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_role(actor, Role::Issuer)?;
        check_batch_size(requests.len())?;

        let mut result = BatchResult::new(BatchOperation::AddClaims, requests.len());
        for (index, request) in requests.iter().enumerate() {
            match self.add_claim_unchecked(store, &actor.id, request) {
                Ok(_) => result.record_success(),
                Err(e) => result.record_failure(index, e.to_string()),
            }
        }

        self.finish_batch(store, result)
    }

    /// Verification status for each input id, in input order.
    ///
    /// Pure read with no failure mode beyond `false` for unknown
    /// identities, so no `BatchResult` is produced and no size bound
    /// applies. Cost is O(n) in the input size (a fixed number of point
    /// lookups per id).
    pub fn batch_check_verification<S: RegistryStore>(
        &self,
        store: &S,
        ids: &[IdentityId],
    ) -> Result<Vec<bool>, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        let mut verified = Vec::with_capacity(ids.len());
        for id in ids {
            verified.push(self.is_verified(store, id)?);
        }
        Ok(verified)
    }

    /// Get a previously completed batch's result
    pub fn get_batch_result<S: RegistryStore>(
        &self,
        store: &S,
        batch_id: BatchId,
    ) -> Result<BatchResult, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        store
            .get_batch_result(batch_id)
            .map_err(|e| RegistryError::Store(e.to_string()))?
            .ok_or(RegistryError::BatchNotFound(batch_id))
    }

    /// Persist the result and announce completion
    fn finish_batch<S: RegistryStore>(
        &mut self,
        store: &mut S,
        result: BatchResult,
    ) -> Result<BatchId, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        debug_assert!(result.is_consistent());

        let batch_id = result.id;
        let (success_count, failure_count) = (result.success_count, result.failure_count);
        store
            .put_batch_result(result)
            .map_err(|e| RegistryError::Store(e.to_string()))?;

        tracing::info!(
            batch_id = %batch_id,
            success_count,
            failure_count,
            "batch completed"
        );
        self.emit(RegistryEvent::BatchCompleted {
            batch_id,
            success_count,
            failure_count,
        });
        Ok(batch_id)
    }
}
