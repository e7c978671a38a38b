//! End-to-end lifecycle tests against the SQLite store
//!
//! One investor keeps auto-renewal, another opts out, trust gets revoked
//! for a third issuer - the sweep resolves each accordingly.

use attestor_domain::{
    Actor, ClaimTopic, EventLog, IdentityId, ManualClock, RegistryEvent, StandardCatalog,
};
use attestor_registry::{
    ClaimRequest, ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory,
};
use attestor_store::SqliteStore;

fn id(s: &str) -> IdentityId {
    IdentityId::parse(s).unwrap()
}

fn request(identity: &str, topic: ClaimTopic, expires_at: u64, auto_renewal: bool) -> ClaimRequest {
    ClaimRequest {
        identity: id(identity),
        topic,
        data: b"attestation".to_vec(),
        expires_at: Some(expires_at),
        auto_renewal,
    }
}

#[test]
fn test_full_claim_lifecycle() {
    let clock = ManualClock::new(1_000);
    let mut directory = InMemoryIssuerDirectory::new();
    directory.trust_many(id("kyc-bureau"), [ClaimTopic::KycApproved]);
    directory.trust_many(id("aml-bureau"), [ClaimTopic::AmlCleared]);

    let config = ExpirationConfig {
        default_expiration_secs: 1_000,
        renewal_grace_secs: 200,
        batch_expiration_check_limit: 50,
        auto_expiration_enabled: true,
    };
    let mut registry = IdentityRegistry::with_clock(
        directory,
        StandardCatalog::with_required(vec![ClaimTopic::KycApproved]),
        config,
        clock.clone(),
    )
    .unwrap();

    let log = EventLog::new();
    registry.subscribe(Box::new(log.clone()));

    let mut store = SqliteStore::new(":memory:").unwrap();
    let operator = Actor::operator(id("ops-1"));
    let kyc_bureau = Actor::issuer(id("kyc-bureau"));
    let aml_bureau = Actor::issuer(id("aml-bureau"));

    // Three investors, claims expiring at t=2000
    for name in ["renews", "opted-out", "orphaned"] {
        registry.register_identity(&mut store, &operator, &id(name)).unwrap();
    }
    registry
        .add_claim(&mut store, &kyc_bureau, &request("renews", ClaimTopic::KycApproved, 2_000, true))
        .unwrap();
    registry
        .add_claim(&mut store, &kyc_bureau, &request("opted-out", ClaimTopic::KycApproved, 2_000, true))
        .unwrap();
    registry
        .add_claim(&mut store, &aml_bureau, &request("orphaned", ClaimTopic::AmlCleared, 2_000, true))
        .unwrap();
    registry
        .add_claim(&mut store, &kyc_bureau, &request("orphaned", ClaimTopic::KycApproved, 2_000, true))
        .unwrap();

    for name in ["renews", "opted-out", "orphaned"] {
        assert!(registry.is_verified(&store, &id(name)).unwrap(), "{}", name);
    }

    // All claims fall inside a 1500s reminder window
    let expiring = registry.expiring_identities(&store, 1_500).unwrap();
    assert_eq!(expiring.len(), 3);

    // One owner opts out; one issuer loses trust
    let owner = Actor::new(id("opted-out"), vec![]);
    registry
        .set_auto_renewal(&mut store, &owner, &id("opted-out"), false)
        .unwrap();
    registry.directory_mut().remove_issuer(&id("aml-bureau"));

    clock.set(2_500);
    let outcome = registry
        .process_expired_claims(&mut store, &operator, 50)
        .unwrap();

    // "renews" KYC renewed; "orphaned" KYC renewed; "opted-out" KYC and
    // "orphaned" AML expired
    assert_eq!(outcome.renewed, 2);
    assert_eq!(outcome.expired, 2);

    assert!(registry.is_verified(&store, &id("renews")).unwrap());
    assert!(!registry.is_verified(&store, &id("opted-out")).unwrap());
    assert!(registry.is_verified(&store, &id("orphaned")).unwrap());

    let renewed = registry
        .get_claim(&store, &id("renews"), ClaimTopic::KycApproved)
        .unwrap()
        .unwrap();
    assert_eq!(renewed.expires_at, 3_000);
    assert_eq!(renewed.renewal_count, 1);

    // Re-running immediately does nothing further
    let again = registry
        .process_expired_claims(&mut store, &operator, 50)
        .unwrap();
    assert_eq!(again.processed(), 0);

    let events = log.events();
    let renew_count = events
        .iter()
        .filter(|e| matches!(e, RegistryEvent::ClaimRenewed { .. }))
        .count();
    let expire_count = events
        .iter()
        .filter(|e| matches!(e, RegistryEvent::ClaimExpired { .. }))
        .count();
    assert_eq!(renew_count, 2);
    assert_eq!(expire_count, 2);
}

#[test]
fn test_repeated_renewal_accumulates() {
    let clock = ManualClock::new(0);
    let mut directory = InMemoryIssuerDirectory::new();
    directory.trust(id("kyc-bureau"), ClaimTopic::KycApproved);

    let config = ExpirationConfig {
        default_expiration_secs: 100,
        renewal_grace_secs: 10,
        batch_expiration_check_limit: 50,
        auto_expiration_enabled: true,
    };
    let mut registry = IdentityRegistry::with_clock(
        directory,
        StandardCatalog::with_required(vec![ClaimTopic::KycApproved]),
        config,
        clock.clone(),
    )
    .unwrap();

    let mut store = SqliteStore::new(":memory:").unwrap();
    let operator = Actor::operator(id("ops-1"));
    let bureau = Actor::issuer(id("kyc-bureau"));

    registry.register_identity(&mut store, &operator, &id("investor-1")).unwrap();
    registry
        .add_claim(&mut store, &bureau, &request("investor-1", ClaimTopic::KycApproved, 100, true))
        .unwrap();

    // Sweep once per period; the renewal count climbs monotonically
    for cycle in 1..=5u32 {
        clock.set(cycle as u64 * 100);
        let outcome = registry
            .process_expired_claims(&mut store, &operator, 10)
            .unwrap();
        assert_eq!(outcome.renewed, 1, "cycle {}", cycle);

        let claim = registry
            .get_claim(&store, &id("investor-1"), ClaimTopic::KycApproved)
            .unwrap()
            .unwrap();
        assert_eq!(claim.renewal_count, cycle);
        assert_eq!(claim.expires_at, (cycle as u64 + 1) * 100);
    }
}
