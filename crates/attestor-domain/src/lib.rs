//! Attestor Domain Layer
//!
//! This crate contains the core data model for the Attestor identity/claims
//! registry. It defines the fundamental concepts, value objects, and trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Identity**: a registered real-world entity, addressed by an opaque id
//! - **Claim**: an issuer-asserted, topic-scoped, time-bounded fact about an
//!   identity (e.g., "KYC approved")
//! - **Claim topic**: a categorical claim type from a fixed catalog
//! - **Batch result**: the aggregated, queryable outcome of a multi-item
//!   operation with per-item failure isolation
//! - **Roles**: admin / operator / issuer capabilities gating mutations
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business types only (the `uuid` primitive is the one exception)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions (store, issuer
//!   directory, topic catalog, clock, event sinks)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod claim;
pub mod event;
pub mod identity;
pub mod role;
pub mod topic;
pub mod traits;

// Re-exports for convenience
pub use batch::{BatchId, BatchOperation, BatchResult};
pub use claim::{Claim, ClaimStatus};
pub use event::{EventLog, EventSink, RegistryEvent};
pub use identity::{IdentityId, IdentityRecord};
pub use role::{Actor, Role};
pub use topic::{ClaimTopic, StandardCatalog};
pub use traits::{Clock, ManualClock, SystemClock};
