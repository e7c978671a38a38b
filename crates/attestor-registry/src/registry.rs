//! Core registry implementation - identity registration, claim lifecycle,
//! and the expiration sweep

use crate::access::{require_role, require_self_or_admin};
use crate::{ExpirationConfig, RegistryError};
use attestor_domain::traits::{Clock, IssuerDirectory, RegistryStore, TopicCatalog};
use attestor_domain::{
    Actor, Claim, ClaimTopic, EventSink, IdentityId, IdentityRecord, RegistryEvent, Role,
    SystemClock,
};

/// Map a store error into the registry error type
fn store_err<E: std::fmt::Display>(e: E) -> RegistryError {
    RegistryError::Store(e.to_string())
}

/// A request to issue one claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    /// The subject identity
    pub identity: IdentityId,

    /// The asserted topic
    pub topic: ClaimTopic,

    /// Opaque issuer payload
    pub data: Vec<u8>,

    /// Explicit expiry; `None` resolves to now + the configured default
    /// period at write time
    pub expires_at: Option<u64>,

    /// Whether the sweep should renew this claim instead of expiring it
    pub auto_renewal: bool,
}

/// Existence flag and metadata for an identity; `exists == false` carries
/// no metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityInfo {
    /// Whether the identity is registered
    pub exists: bool,

    /// Registration timestamp, when registered
    pub registered_at: Option<u64>,

    /// Identity-level auto-renewal opt-in, when registered
    pub auto_renewal: Option<bool>,
}

/// Counts from one expiration sweep call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Claims renewed (expiry advanced, renewal count incremented)
    pub renewed: usize,

    /// Claims expired (removed from the active set)
    pub expired: usize,
}

impl SweepOutcome {
    /// Total claims processed by the sweep
    pub fn processed(&self) -> usize {
        self.renewed + self.expired
    }
}

/// The identity/claims registry engine
///
/// Owns the trusted issuer directory, topic catalog, expiration
/// configuration, clock, and observer list; every operation takes the
/// store it acts on, so one registry can drive any `RegistryStore`
/// implementation.
///
/// Expiration is pull-based: claims past expiry stay in the store until an
/// explicit `process_expired_claims` call resolves them. Reads never
/// mutate, and `is_verified` checks expiry against the clock directly so a
/// lagging sweep can never grant verification.
///
/// # Examples
///
/// ```no_run
/// use attestor_domain::{Actor, IdentityId, StandardCatalog};
/// use attestor_registry::{ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory};
/// use attestor_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new("attestor.db")?;
/// let mut registry = IdentityRegistry::new(
///     InMemoryIssuerDirectory::new(),
///     StandardCatalog::default(),
///     ExpirationConfig::default(),
/// )?;
///
/// let operator = Actor::operator(IdentityId::parse("ops-1")?);
/// let investor = IdentityId::parse("investor-1")?;
/// registry.register_identity(&mut store, &operator, &investor)?;
/// assert!(registry.identity_info(&store, &investor)?.exists);
/// # Ok(())
/// # }
/// ```
pub struct IdentityRegistry<D: IssuerDirectory, C: TopicCatalog> {
    directory: D,
    catalog: C,
    config: ExpirationConfig,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn EventSink + Send>>,
}

impl<D: IssuerDirectory, C: TopicCatalog> IdentityRegistry<D, C> {
    /// Create a registry with the system clock
    pub fn new(directory: D, catalog: C, config: ExpirationConfig) -> Result<Self, RegistryError> {
        Self::with_clock(directory, catalog, config, SystemClock)
    }

    /// Create a registry with an explicit clock (tests, simulations)
    pub fn with_clock(
        directory: D,
        catalog: C,
        config: ExpirationConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, RegistryError> {
        config.validate()?;
        Ok(Self {
            directory,
            catalog,
            config,
            clock: Box::new(clock),
            observers: Vec::new(),
        })
    }

    /// Register an observer for registry notifications
    pub fn subscribe(&mut self, sink: Box<dyn EventSink + Send>) {
        self.observers.push(sink);
    }

    /// The trusted issuer directory
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Mutable access to the issuer directory (trust grants/revocations)
    pub fn directory_mut(&mut self) -> &mut D {
        &mut self.directory
    }

    /// The topic catalog
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The current expiration configuration
    pub fn config(&self) -> &ExpirationConfig {
        &self.config
    }

    /// Replace the expiration configuration. Admin-only.
    ///
    /// Validation runs first; on rejection the prior configuration is left
    /// untouched. On success all four fields are replaced together and an
    /// `ExpirationConfigUpdated` notification carries the new values.
    pub fn update_config(
        &mut self,
        actor: &Actor,
        config: ExpirationConfig,
    ) -> Result<(), RegistryError> {
        require_role(actor, Role::Admin)?;
        config.validate()?;

        self.config = config;
        tracing::info!(
            default_expiration_secs = self.config.default_expiration_secs,
            renewal_grace_secs = self.config.renewal_grace_secs,
            batch_expiration_check_limit = self.config.batch_expiration_check_limit,
            auto_expiration_enabled = self.config.auto_expiration_enabled,
            "expiration config updated"
        );
        self.emit(RegistryEvent::ExpirationConfigUpdated {
            default_expiration_secs: self.config.default_expiration_secs,
            renewal_grace_secs: self.config.renewal_grace_secs,
            batch_expiration_check_limit: self.config.batch_expiration_check_limit,
            auto_expiration_enabled: self.config.auto_expiration_enabled,
        });
        Ok(())
    }

    /// Register a new identity. Operator-only.
    ///
    /// Fails with `AlreadyRegistered` for a duplicate id; registration is
    /// not an idempotent no-op and callers must check.
    pub fn register_identity<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        id: &IdentityId,
    ) -> Result<IdentityRecord, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_role(actor, Role::Operator)?;
        self.register_unchecked(store, id)
    }

    /// Registration body shared with the batch path (role already checked)
    pub(crate) fn register_unchecked<S: RegistryStore>(
        &mut self,
        store: &mut S,
        id: &IdentityId,
    ) -> Result<IdentityRecord, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        if store.get_identity(id).map_err(store_err)?.is_some() {
            return Err(RegistryError::AlreadyRegistered(id.clone()));
        }

        let record = IdentityRecord::new(id.clone(), self.clock.now());
        store.put_identity(record.clone()).map_err(store_err)?;

        tracing::debug!(identity = %id, "identity registered");
        self.emit(RegistryEvent::IdentityRegistered {
            identity: id.clone(),
            registered_at: record.registered_at,
        });
        Ok(record)
    }

    /// Existence flag and metadata for an identity. Never fails for an
    /// absent identity.
    pub fn identity_info<S: RegistryStore>(
        &self,
        store: &S,
        id: &IdentityId,
    ) -> Result<IdentityInfo, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        Ok(match store.get_identity(id).map_err(store_err)? {
            Some(record) => IdentityInfo {
                exists: true,
                registered_at: Some(record.registered_at),
                auto_renewal: Some(record.auto_renewal),
            },
            None => IdentityInfo {
                exists: false,
                registered_at: None,
                auto_renewal: None,
            },
        })
    }

    /// Whether every required topic has a non-expired claim for `id`.
    ///
    /// Checks `expires_at` against the clock on every call rather than
    /// relying on sweep state, since the sweep may lag. Unknown identities
    /// are never verified.
    pub fn is_verified<S: RegistryStore>(
        &self,
        store: &S,
        id: &IdentityId,
    ) -> Result<bool, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        if store.get_identity(id).map_err(store_err)?.is_none() {
            return Ok(false);
        }

        let now = self.clock.now();
        for topic in self.catalog.required_topics() {
            match store.get_claim(id, *topic).map_err(store_err)? {
                Some(claim) if claim.is_active(now) => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// The claim held by `id` for `topic`, if any
    pub fn get_claim<S: RegistryStore>(
        &self,
        store: &S,
        id: &IdentityId,
        topic: ClaimTopic,
    ) -> Result<Option<Claim>, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        store.get_claim(id, topic).map_err(store_err)
    }

    /// Issue a claim. Issuer-only, and the caller must be currently
    /// trusted for the topic (consulted at call time, never cached).
    ///
    /// Overwrites any prior claim for the same (identity, topic).
    pub fn add_claim<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        request: &ClaimRequest,
    ) -> Result<Claim, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_role(actor, Role::Issuer)?;
        self.add_claim_unchecked(store, &actor.id, request)
    }

    /// Issuance body shared with the batch path (role already checked)
    pub(crate) fn add_claim_unchecked<S: RegistryStore>(
        &mut self,
        store: &mut S,
        issuer: &IdentityId,
        request: &ClaimRequest,
    ) -> Result<Claim, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        if !self.catalog.contains(request.topic) {
            return Err(RegistryError::UnknownTopic(request.topic));
        }
        if !self.directory.is_trusted_for(issuer, request.topic) {
            return Err(RegistryError::UntrustedIssuer {
                issuer: issuer.clone(),
                topic: request.topic,
            });
        }
        if store.get_identity(&request.identity).map_err(store_err)?.is_none() {
            return Err(RegistryError::IdentityNotFound(request.identity.clone()));
        }

        let now = self.clock.now();
        let expires_at = match request.expires_at {
            None => now + self.config.default_expiration_secs,
            Some(t) if t > now => t,
            Some(t) => {
                return Err(RegistryError::InvalidExpiry {
                    expires_at: t,
                    issued_at: now,
                })
            }
        };

        let claim = Claim::new(
            request.topic,
            issuer.clone(),
            request.data.clone(),
            now,
            expires_at,
            request.auto_renewal,
        );
        store
            .put_claim(&request.identity, claim.clone())
            .map_err(store_err)?;

        tracing::debug!(
            identity = %request.identity,
            topic = %request.topic,
            issuer = %issuer,
            expires_at,
            "claim added"
        );
        self.emit(RegistryEvent::ClaimAdded {
            identity: request.identity.clone(),
            topic: request.topic,
            issuer: issuer.clone(),
            expires_at,
        });
        Ok(claim)
    }

    /// Toggle an identity's auto-renewal opt-in. Callable by the identity
    /// itself or an admin.
    pub fn set_auto_renewal<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        id: &IdentityId,
        enabled: bool,
    ) -> Result<(), RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_self_or_admin(actor, id)?;

        let mut record = store
            .get_identity(id)
            .map_err(store_err)?
            .ok_or_else(|| RegistryError::IdentityNotFound(id.clone()))?;

        record.auto_renewal = enabled;
        store.put_identity(record).map_err(store_err)?;

        tracing::debug!(identity = %id, enabled, "auto-renewal toggled");
        self.emit(RegistryEvent::AutoRenewalStatusChanged {
            identity: id.clone(),
            enabled,
        });
        Ok(())
    }

    /// Identities holding at least one claim expiring within
    /// `[now, now + within_secs]`, deduplicated in scan order.
    ///
    /// Pure read, used for proactive renewal reminders.
    pub fn expiring_identities<S: RegistryStore>(
        &self,
        store: &S,
        within_secs: u64,
    ) -> Result<Vec<IdentityId>, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        if within_secs == 0 {
            return Err(RegistryError::InvalidDuration);
        }

        let now = self.clock.now();
        let rows = store
            .claims_expiring_between(now, now + within_secs)
            .map_err(store_err)?;

        let mut seen = std::collections::HashSet::new();
        let mut identities = Vec::new();
        for (identity, _) in rows {
            if seen.insert(identity.clone()) {
                identities.push(identity);
            }
        }
        Ok(identities)
    }

    /// Resolve claims past expiry. Operator-only.
    ///
    /// Scans claims with `expires_at <= now`, up to
    /// `min(max_to_process, config.batch_expiration_check_limit)` of them,
    /// in the store's documented scan order. Each expired claim is either
    /// renewed (claim opted in, identity opted in, auto-expiration enabled,
    /// issuer still trusted for the topic) or removed. Claims not yet due
    /// are simply not selected - never an error.
    ///
    /// The work bound is the throttling mechanism: call again to make
    /// further progress. Re-running immediately after a full sweep
    /// processes zero additional claims until more become due.
    pub fn process_expired_claims<S: RegistryStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        max_to_process: usize,
    ) -> Result<SweepOutcome, RegistryError>
    where
        S::Error: std::fmt::Display,
    {
        require_role(actor, Role::Operator)?;
        if max_to_process == 0 {
            return Err(RegistryError::InvalidSweepLimit);
        }

        let limit = max_to_process.min(self.config.batch_expiration_check_limit as usize);
        let now = self.clock.now();
        let due = store.claims_due(now, limit).map_err(store_err)?;

        let mut outcome = SweepOutcome::default();
        for (identity, claim) in due {
            let identity_opted_in = store
                .get_identity(&identity)
                .map_err(store_err)?
                .map(|record| record.auto_renewal)
                .unwrap_or(false);

            let renewable = self.config.auto_expiration_enabled
                && claim.auto_renewal
                && identity_opted_in
                && self.directory.is_trusted_for(&claim.issuer, claim.topic);

            if renewable {
                let mut renewed = claim;
                renewed.expires_at += self.config.default_expiration_secs;
                renewed.renewal_count += 1;
                let (topic, expires_at, renewal_count) =
                    (renewed.topic, renewed.expires_at, renewed.renewal_count);
                store.put_claim(&identity, renewed).map_err(store_err)?;

                tracing::debug!(
                    identity = %identity,
                    topic = %topic,
                    expires_at,
                    renewal_count,
                    "claim renewed"
                );
                self.emit(RegistryEvent::ClaimRenewed {
                    identity,
                    topic,
                    expires_at,
                    renewal_count,
                });
                outcome.renewed += 1;
            } else {
                store.remove_claim(&identity, claim.topic).map_err(store_err)?;

                tracing::debug!(
                    identity = %identity,
                    topic = %claim.topic,
                    expires_at = claim.expires_at,
                    "claim expired"
                );
                self.emit(RegistryEvent::ClaimExpired {
                    identity,
                    topic: claim.topic,
                    expires_at: claim.expires_at,
                });
                outcome.expired += 1;
            }
        }

        tracing::info!(
            renewed = outcome.renewed,
            expired = outcome.expired,
            "expiration sweep completed"
        );
        Ok(outcome)
    }

    /// Deliver an event to every observer
    pub(crate) fn emit(&self, event: RegistryEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryIssuerDirectory;
    use attestor_domain::{BatchId, BatchResult, EventLog, ManualClock, StandardCatalog};
    use std::collections::{BTreeMap, HashMap};

    // In-memory store for engine unit tests
    #[derive(Default)]
    struct MockStore {
        identities: HashMap<IdentityId, IdentityRecord>,
        claims: BTreeMap<(IdentityId, u32), Claim>,
        batches: HashMap<BatchId, BatchResult>,
    }

    impl RegistryStore for MockStore {
        type Error = String;

        fn put_identity(&mut self, record: IdentityRecord) -> Result<(), Self::Error> {
            self.identities.insert(record.id.clone(), record);
            Ok(())
        }

        fn get_identity(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, Self::Error> {
            Ok(self.identities.get(id).cloned())
        }

        fn put_claim(&mut self, identity: &IdentityId, claim: Claim) -> Result<(), Self::Error> {
            self.claims
                .insert((identity.clone(), claim.topic.code()), claim);
            Ok(())
        }

        fn get_claim(
            &self,
            identity: &IdentityId,
            topic: ClaimTopic,
        ) -> Result<Option<Claim>, Self::Error> {
            Ok(self.claims.get(&(identity.clone(), topic.code())).cloned())
        }

        fn remove_claim(
            &mut self,
            identity: &IdentityId,
            topic: ClaimTopic,
        ) -> Result<bool, Self::Error> {
            Ok(self
                .claims
                .remove(&(identity.clone(), topic.code()))
                .is_some())
        }

        fn claims_due(
            &self,
            cutoff: u64,
            limit: usize,
        ) -> Result<Vec<(IdentityId, Claim)>, Self::Error> {
            let mut due: Vec<(IdentityId, Claim)> = self
                .claims
                .iter()
                .filter(|(_, claim)| claim.expires_at <= cutoff)
                .map(|((identity, _), claim)| (identity.clone(), claim.clone()))
                .collect();
            due.sort_by_key(|(identity, claim)| {
                (claim.expires_at, identity.clone(), claim.topic.code())
            });
            due.truncate(limit);
            Ok(due)
        }

        fn claims_expiring_between(
            &self,
            from: u64,
            to: u64,
        ) -> Result<Vec<(IdentityId, Claim)>, Self::Error> {
            let mut expiring: Vec<(IdentityId, Claim)> = self
                .claims
                .iter()
                .filter(|(_, claim)| claim.expires_at >= from && claim.expires_at <= to)
                .map(|((identity, _), claim)| (identity.clone(), claim.clone()))
                .collect();
            expiring.sort_by_key(|(identity, claim)| {
                (claim.expires_at, identity.clone(), claim.topic.code())
            });
            Ok(expiring)
        }

        fn put_batch_result(&mut self, result: BatchResult) -> Result<(), Self::Error> {
            self.batches.insert(result.id, result);
            Ok(())
        }

        fn get_batch_result(&self, id: BatchId) -> Result<Option<BatchResult>, Self::Error> {
            Ok(self.batches.get(&id).cloned())
        }
    }

    fn id(s: &str) -> IdentityId {
        IdentityId::parse(s).unwrap()
    }

    fn test_config() -> ExpirationConfig {
        ExpirationConfig {
            default_expiration_secs: 1000,
            renewal_grace_secs: 100,
            batch_expiration_check_limit: 50,
            auto_expiration_enabled: true,
        }
    }

    type TestRegistry = IdentityRegistry<InMemoryIssuerDirectory, StandardCatalog>;

    fn setup_with_required(
        required: Vec<ClaimTopic>,
    ) -> (TestRegistry, MockStore, ManualClock, EventLog) {
        let clock = ManualClock::new(1_000);
        let mut directory = InMemoryIssuerDirectory::new();
        directory.trust_many(id("issuer-1"), ClaimTopic::ALL);

        let mut registry = IdentityRegistry::with_clock(
            directory,
            StandardCatalog::with_required(required),
            test_config(),
            clock.clone(),
        )
        .unwrap();

        let log = EventLog::new();
        registry.subscribe(Box::new(log.clone()));
        (registry, MockStore::default(), clock, log)
    }

    fn setup() -> (TestRegistry, MockStore, ManualClock, EventLog) {
        setup_with_required(vec![ClaimTopic::KycApproved])
    }

    fn kyc_request(identity: &str, expires_at: Option<u64>, auto_renewal: bool) -> ClaimRequest {
        ClaimRequest {
            identity: id(identity),
            topic: ClaimTopic::KycApproved,
            data: vec![0x01],
            expires_at,
            auto_renewal,
        }
    }

    #[test]
    fn test_register_and_info() {
        let (mut registry, mut store, _, log) = setup();
        let operator = Actor::operator(id("ops-1"));

        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        let info = registry.identity_info(&store, &id("investor-1")).unwrap();
        assert!(info.exists);
        assert_eq!(info.registered_at, Some(1_000));
        assert_eq!(info.auto_renewal, Some(true));
        assert!(matches!(
            log.events()[0],
            RegistryEvent::IdentityRegistered { .. }
        ));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));

        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        let err = registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered(_)));
    }

    #[test]
    fn test_register_requires_operator_and_mutates_nothing() {
        let (mut registry, mut store, _, log) = setup();
        let issuer = Actor::issuer(id("issuer-1"));

        let err = registry
            .register_identity(&mut store, &issuer, &id("investor-1"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAuthorized { .. }));
        assert!(!registry.identity_info(&store, &id("investor-1")).unwrap().exists);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_info_for_absent_identity_never_fails() {
        let (registry, store, _, _) = setup();
        let info = registry.identity_info(&store, &id("ghost")).unwrap();
        assert!(!info.exists);
        assert_eq!(info.registered_at, None);
    }

    #[test]
    fn test_add_claim_resolves_default_expiry() {
        let (mut registry, mut store, _, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        let claim = registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", None, false))
            .unwrap();

        // now (1000) + default period (1000)
        assert_eq!(claim.issued_at, 1_000);
        assert_eq!(claim.expires_at, 2_000);
        assert!(log
            .events()
            .iter()
            .any(|e| matches!(e, RegistryEvent::ClaimAdded { expires_at: 2_000, .. })));
    }

    #[test]
    fn test_add_claim_explicit_expiry_must_be_in_future() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        let claim = registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(5_000), false))
            .unwrap();
        assert_eq!(claim.expires_at, 5_000);

        let err = registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(1_000), false))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidExpiry { .. }));
    }

    #[test]
    fn test_add_claim_unregistered_identity() {
        let (mut registry, mut store, _, _) = setup();
        let issuer = Actor::issuer(id("issuer-1"));

        let err = registry
            .add_claim(&mut store, &issuer, &kyc_request("ghost", None, false))
            .unwrap_err();
        assert!(matches!(err, RegistryError::IdentityNotFound(_)));
    }

    #[test]
    fn test_add_claim_untrusted_issuer() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        // Holds the issuer role but has no directory entry
        let rogue = Actor::issuer(id("issuer-2"));
        let err = registry
            .add_claim(&mut store, &rogue, &kyc_request("investor-1", None, false))
            .unwrap_err();
        assert!(matches!(err, RegistryError::UntrustedIssuer { .. }));
    }

    #[test]
    fn test_add_claim_requires_issuer_role() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        // Trusted in the directory but the caller lacks the issuer role
        registry
            .directory_mut()
            .trust(id("ops-1"), ClaimTopic::KycApproved);
        let err = registry
            .add_claim(&mut store, &operator, &kyc_request("investor-1", None, false))
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAuthorized { .. }));
    }

    #[test]
    fn test_add_claim_replaces_same_topic() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(3_000), true))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(7_000), false))
            .unwrap();

        let claim = registry
            .get_claim(&store, &id("investor-1"), ClaimTopic::KycApproved)
            .unwrap()
            .unwrap();
        assert_eq!(claim.expires_at, 7_000);
        assert!(!claim.auto_renewal);
        // Replacement is a fresh claim, not a renewal
        assert_eq!(claim.renewal_count, 0);
    }

    #[test]
    fn test_verification_requires_every_required_topic() {
        let (mut registry, mut store, _, _) =
            setup_with_required(vec![ClaimTopic::KycApproved, ClaimTopic::AmlCleared]);
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        assert!(!registry.is_verified(&store, &id("investor-1")).unwrap());

        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", None, false))
            .unwrap();
        assert!(!registry.is_verified(&store, &id("investor-1")).unwrap());

        let aml = ClaimRequest {
            identity: id("investor-1"),
            topic: ClaimTopic::AmlCleared,
            data: vec![],
            expires_at: None,
            auto_renewal: false,
        };
        registry.add_claim(&mut store, &issuer, &aml).unwrap();
        assert!(registry.is_verified(&store, &id("investor-1")).unwrap());
    }

    #[test]
    fn test_verification_checks_expiry_without_sweep() {
        let (mut registry, mut store, clock, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), false))
            .unwrap();

        assert!(registry.is_verified(&store, &id("investor-1")).unwrap());

        // Past expiry, before any sweep runs
        clock.set(2_000);
        assert!(!registry.is_verified(&store, &id("investor-1")).unwrap());
    }

    #[test]
    fn test_unregistered_identity_is_never_verified() {
        let (registry, store, _, _) = setup_with_required(vec![]);
        assert!(!registry.is_verified(&store, &id("ghost")).unwrap());
    }

    #[test]
    fn test_empty_required_set_verifies_registered_identity() {
        let (mut registry, mut store, _, _) = setup_with_required(vec![]);
        let operator = Actor::operator(id("ops-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        assert!(registry.is_verified(&store, &id("investor-1")).unwrap());
    }

    #[test]
    fn test_sweep_expires_claim_and_flips_verification() {
        let (mut registry, mut store, clock, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), false))
            .unwrap();

        clock.set(2_500);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();

        assert_eq!(outcome.expired, 1);
        assert_eq!(outcome.renewed, 0);
        assert!(!registry.is_verified(&store, &id("investor-1")).unwrap());
        assert!(registry
            .get_claim(&store, &id("investor-1"), ClaimTopic::KycApproved)
            .unwrap()
            .is_none());
        // The event carries the original expiry
        assert!(log.events().iter().any(|e| matches!(
            e,
            RegistryEvent::ClaimExpired { expires_at: 2_000, .. }
        )));
    }

    #[test]
    fn test_sweep_renews_opted_in_claim() {
        let (mut registry, mut store, clock, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), true))
            .unwrap();

        clock.set(2_100);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();

        assert_eq!(outcome.renewed, 1);
        assert_eq!(outcome.expired, 0);

        let claim = registry
            .get_claim(&store, &id("investor-1"), ClaimTopic::KycApproved)
            .unwrap()
            .unwrap();
        // Expiry advances by the default period from the OLD expiry
        assert_eq!(claim.expires_at, 3_000);
        assert_eq!(claim.renewal_count, 1);
        assert!(registry.is_verified(&store, &id("investor-1")).unwrap());
        assert!(log.events().iter().any(|e| matches!(
            e,
            RegistryEvent::ClaimRenewed { expires_at: 3_000, renewal_count: 1, .. }
        )));
    }

    #[test]
    fn test_sweep_expires_when_issuer_trust_revoked() {
        let (mut registry, mut store, clock, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), true))
            .unwrap();

        // Trust revoked between issuance and the sweep must be observed
        registry
            .directory_mut()
            .revoke(&id("issuer-1"), ClaimTopic::KycApproved);

        clock.set(2_100);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();

        assert_eq!(outcome.expired, 1);
        assert_eq!(outcome.renewed, 0);
        let events = log.events();
        assert!(events.iter().any(|e| matches!(e, RegistryEvent::ClaimExpired { .. })));
        assert!(!events.iter().any(|e| matches!(e, RegistryEvent::ClaimRenewed { .. })));
    }

    #[test]
    fn test_sweep_respects_global_auto_expiration_switch() {
        let (mut registry, mut store, clock, _) = setup();
        let admin = Actor::admin(id("root"));
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), true))
            .unwrap();

        let mut config = test_config();
        config.auto_expiration_enabled = false;
        registry.update_config(&admin, config).unwrap();

        clock.set(2_100);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(outcome.expired, 1);
        assert_eq!(outcome.renewed, 0);
    }

    #[test]
    fn test_identity_opt_out_blocks_renewal() {
        let (mut registry, mut store, clock, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(2_000), true))
            .unwrap();

        let me = Actor::new(id("investor-1"), vec![]);
        registry
            .set_auto_renewal(&mut store, &me, &id("investor-1"), false)
            .unwrap();

        clock.set(2_100);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(outcome.expired, 1);
        assert_eq!(outcome.renewed, 0);
    }

    #[test]
    fn test_empty_sweep_is_idempotent() {
        let (mut registry, mut store, _, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();
        registry
            .add_claim(&mut store, &issuer, &kyc_request("investor-1", Some(9_000), true))
            .unwrap();
        log.clear();

        // Nothing is due yet
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(outcome.processed(), 0);
        assert!(log.events().is_empty());
        assert!(registry
            .get_claim(&store, &id("investor-1"), ClaimTopic::KycApproved)
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_sweep_bounded_by_config_limit() {
        let (mut registry, mut store, clock, _) = setup();
        let admin = Actor::admin(id("root"));
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));

        for name in ["a", "b", "c"] {
            registry
                .register_identity(&mut store, &operator, &id(name))
                .unwrap();
            registry
                .add_claim(&mut store, &issuer, &kyc_request(name, Some(2_000), false))
                .unwrap();
        }

        let mut config = test_config();
        config.batch_expiration_check_limit = 2;
        registry.update_config(&admin, config).unwrap();

        clock.set(3_000);
        // The caller asks for 10 but config caps each call at 2
        let first = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(first.processed(), 2);

        let second = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(second.processed(), 1);
    }

    #[test]
    fn test_sweep_requires_operator_and_rejects_zero_bound() {
        let (mut registry, mut store, _, _) = setup();
        let issuer = Actor::issuer(id("issuer-1"));
        let operator = Actor::operator(id("ops-1"));

        assert!(matches!(
            registry.process_expired_claims(&mut store, &issuer, 10),
            Err(RegistryError::NotAuthorized { .. })
        ));
        assert!(matches!(
            registry.process_expired_claims(&mut store, &operator, 0),
            Err(RegistryError::InvalidSweepLimit)
        ));
    }

    #[test]
    fn test_set_auto_renewal_authorization() {
        let (mut registry, mut store, _, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        registry
            .register_identity(&mut store, &operator, &id("investor-1"))
            .unwrap();

        // A stranger may not toggle someone else's setting
        let stranger = Actor::new(id("investor-2"), vec![]);
        assert!(matches!(
            registry.set_auto_renewal(&mut store, &stranger, &id("investor-1"), false),
            Err(RegistryError::NotAuthorized { .. })
        ));
        assert_eq!(
            registry
                .identity_info(&store, &id("investor-1"))
                .unwrap()
                .auto_renewal,
            Some(true)
        );

        // Self and admin both may
        let me = Actor::new(id("investor-1"), vec![]);
        registry
            .set_auto_renewal(&mut store, &me, &id("investor-1"), false)
            .unwrap();
        let admin = Actor::admin(id("root"));
        registry
            .set_auto_renewal(&mut store, &admin, &id("investor-1"), true)
            .unwrap();

        assert!(matches!(
            registry.set_auto_renewal(&mut store, &admin, &id("ghost"), true),
            Err(RegistryError::IdentityNotFound(_))
        ));
        assert!(log.events().iter().any(|e| matches!(
            e,
            RegistryEvent::AutoRenewalStatusChanged { enabled: false, .. }
        )));
    }

    #[test]
    fn test_expiring_identities_window_and_dedup() {
        let (mut registry, mut store, _, _) = setup();
        let operator = Actor::operator(id("ops-1"));
        let issuer = Actor::issuer(id("issuer-1"));

        for name in ["a", "b"] {
            registry
                .register_identity(&mut store, &operator, &id(name))
                .unwrap();
        }
        // Two claims on "a" inside the window must yield one entry
        registry
            .add_claim(&mut store, &issuer, &kyc_request("a", Some(1_500), false))
            .unwrap();
        let aml = ClaimRequest {
            identity: id("a"),
            topic: ClaimTopic::AmlCleared,
            data: vec![],
            expires_at: Some(1_600),
            auto_renewal: false,
        };
        registry.add_claim(&mut store, &issuer, &aml).unwrap();
        // Outside the window
        registry
            .add_claim(&mut store, &issuer, &kyc_request("b", Some(9_000), false))
            .unwrap();

        let expiring = registry.expiring_identities(&store, 1_000).unwrap();
        assert_eq!(expiring, vec![id("a")]);

        assert!(matches!(
            registry.expiring_identities(&store, 0),
            Err(RegistryError::InvalidDuration)
        ));
    }

    #[test]
    fn test_update_config_requires_admin_and_is_atomic() {
        let (mut registry, _, _, log) = setup();
        let operator = Actor::operator(id("ops-1"));
        let admin = Actor::admin(id("root"));

        // Not admin: rejected, config unchanged
        assert!(matches!(
            registry.update_config(&operator, ExpirationConfig::lenient()),
            Err(RegistryError::NotAuthorized { .. })
        ));
        assert_eq!(registry.config(), &test_config());

        // Invalid values: rejected, config unchanged
        let bad = ExpirationConfig {
            default_expiration_secs: 0,
            ..test_config()
        };
        assert!(matches!(
            registry.update_config(&admin, bad),
            Err(RegistryError::InvalidPeriod)
        ));
        assert_eq!(registry.config(), &test_config());

        // Valid: all fields replaced together, event fires with new values
        registry
            .update_config(&admin, ExpirationConfig::lenient())
            .unwrap();
        assert_eq!(registry.config(), &ExpirationConfig::lenient());
        assert!(log.events().iter().any(|e| matches!(
            e,
            RegistryEvent::ExpirationConfigUpdated { batch_expiration_check_limit: 100, .. }
        )));
    }
}
