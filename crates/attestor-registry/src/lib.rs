//! Attestor Registry
//!
//! The identity/claims engine: verified-identity records bound to
//! time-limited, issuer-asserted claims, with an explicit bounded
//! expiration sweep, optional auto-renewal, and batch operations with
//! per-item failure isolation.
//!
//! # Overview
//!
//! The registry is responsible for:
//! - **Identity registration**: operator-gated, duplicate-rejecting
//! - **Claim issuance**: issuer-gated, trust consulted per topic at call
//!   time, expiry resolved at write time
//! - **Expiration sweep**: an explicitly invoked, work-bounded maintenance
//!   operation that renews or removes claims past expiry
//! - **Batch operations**: bulk registration/issuance with per-item
//!   failure isolation and persisted, auditable results
//!
//! # Architecture
//!
//! Expiration is pull-based. The execution model this engine preserves has
//! no background scheduler: reads are cheap and side-effect-free, and
//! claims past expiry stay in the store until a sweep call resolves them.
//! Verification (`is_verified`) therefore checks expiry against the clock
//! directly, so a lagging sweep can never grant access.
//!
//! The registry owns its collaborators (trusted issuer directory, topic
//! catalog, clock, observers) and is handed the store on every call, so
//! one engine can drive any `RegistryStore` implementation.
//!
//! # Usage
//!
//! ```no_run
//! use attestor_domain::{Actor, ClaimTopic, IdentityId, StandardCatalog};
//! use attestor_registry::{
//!     ClaimRequest, ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory,
//! };
//! use attestor_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("attestor.db")?;
//!
//! let mut directory = InMemoryIssuerDirectory::new();
//! let issuer_id = IdentityId::parse("issuer-1")?;
//! directory.trust(issuer_id.clone(), ClaimTopic::KycApproved);
//!
//! let mut registry = IdentityRegistry::new(
//!     directory,
//!     StandardCatalog::default(),
//!     ExpirationConfig::default(),
//! )?;
//!
//! let operator = Actor::operator(IdentityId::parse("ops-1")?);
//! let investor = IdentityId::parse("investor-1")?;
//! registry.register_identity(&mut store, &operator, &investor)?;
//!
//! let issuer = Actor::issuer(issuer_id);
//! registry.add_claim(&mut store, &issuer, &ClaimRequest {
//!     identity: investor.clone(),
//!     topic: ClaimTopic::KycApproved,
//!     data: b"approved".to_vec(),
//!     expires_at: None,
//!     auto_renewal: true,
//! })?;
//!
//! // Maintenance: resolve up to 50 claims past expiry
//! let outcome = registry.process_expired_claims(&mut store, &operator, 50)?;
//! println!("renewed {}, expired {}", outcome.renewed, outcome.expired);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod access;
mod batch;
mod config;
mod directory;
mod error;
mod registry;

pub use batch::{MAX_BATCH_SIZE, MIN_BATCH_SIZE};
pub use config::ExpirationConfig;
pub use directory::InMemoryIssuerDirectory;
pub use error::{ErrorKind, RegistryError};
pub use registry::{ClaimRequest, IdentityInfo, IdentityRegistry, SweepOutcome};
