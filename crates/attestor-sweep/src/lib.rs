//! Attestor Sweep
//!
//! Background maintenance service driving the registry's expiration sweep.
//!
//! # Overview
//!
//! The registry resolves expired claims only when `process_expired_claims`
//! is explicitly invoked - reads never mutate, and each call does a
//! bounded amount of work. This crate supplies the missing schedule:
//!
//! - **SweepWorker**: invokes the sweep at a configured interval with
//!   operator credentials, until shutdown
//! - **SweepConfig**: interval and per-call work bound, validated
//! - **SweepMetrics**: renewed/expired/cycle counters for monitoring
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! A single maintenance pass needs no worker - call the registry directly:
//!
//! ```no_run
//! use attestor_domain::{Actor, IdentityId, StandardCatalog};
//! use attestor_registry::{ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory};
//! use attestor_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("attestor.db")?;
//! let mut registry = IdentityRegistry::new(
//!     InMemoryIssuerDirectory::new(),
//!     StandardCatalog::default(),
//!     ExpirationConfig::default(),
//! )?;
//! let operator = Actor::operator(IdentityId::parse("ops-1")?);
//!
//! let outcome = registry.process_expired_claims(&mut store, &operator, 50)?;
//! println!("renewed {}, expired {}", outcome.renewed, outcome.expired);
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use attestor_domain::{Actor, IdentityId, StandardCatalog};
//! use attestor_registry::{ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory};
//! use attestor_store::SqliteStore;
//! use attestor_sweep::{SweepConfig, SweepWorker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = SqliteStore::new("attestor.db")?;
//!     let mut registry = IdentityRegistry::new(
//!         InMemoryIssuerDirectory::new(),
//!         StandardCatalog::default(),
//!         ExpirationConfig::default(),
//!     )?;
//!
//!     let operator = Actor::operator(IdentityId::parse("sweep-worker")?);
//!     let mut worker = SweepWorker::new(SweepConfig::default(), operator)?;
//!
//!     // Run indefinitely (until Ctrl+C)
//!     worker.run(&mut registry, &mut store).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The worker can be configured via TOML:
//!
//! ```toml
//! [sweep]
//! sweep_interval_secs = 3600
//! max_claims_per_sweep = 50
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod worker;

pub use config::SweepConfig;
pub use error::SweepError;
pub use metrics::SweepMetrics;
pub use worker::SweepWorker;
