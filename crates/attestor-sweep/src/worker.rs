//! Background worker for periodic expiration sweeps

use crate::{SweepConfig, SweepError, SweepMetrics};
use attestor_domain::traits::{IssuerDirectory, RegistryStore, TopicCatalog};
use attestor_domain::Actor;
use attestor_registry::IdentityRegistry;
use std::time::SystemTime;
use tokio::time::interval;

/// Background worker that invokes the registry sweep on a schedule
///
/// The sweep itself stays pull-based and work-bounded; this worker only
/// supplies the schedule and the operator credentials it sweeps with.
///
/// # Examples
///
/// ```no_run
/// use attestor_domain::{Actor, IdentityId, StandardCatalog};
/// use attestor_registry::{ExpirationConfig, IdentityRegistry, InMemoryIssuerDirectory};
/// use attestor_store::SqliteStore;
/// use attestor_sweep::{SweepConfig, SweepWorker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut store = SqliteStore::new("attestor.db")?;
///     let mut registry = IdentityRegistry::new(
///         InMemoryIssuerDirectory::new(),
///         StandardCatalog::default(),
///         ExpirationConfig::default(),
///     )?;
///
///     let operator = Actor::operator(IdentityId::parse("sweep-worker")?);
///     let mut worker = SweepWorker::new(SweepConfig::default(), operator)?;
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(&mut registry, &mut store).await?;
///     Ok(())
/// }
/// ```
pub struct SweepWorker {
    config: SweepConfig,
    actor: Actor,
    metrics: SweepMetrics,
}

impl SweepWorker {
    /// Create a worker that sweeps as `actor` (must hold the operator role)
    pub fn new(config: SweepConfig, actor: Actor) -> Result<Self, SweepError> {
        config.validate()?;
        Ok(Self {
            config,
            actor,
            metrics: SweepMetrics::new(),
        })
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run the worker indefinitely
    ///
    /// Invokes the sweep at the configured interval until a shutdown
    /// signal (Ctrl+C) is received. Individual sweep failures are logged
    /// and do not stop the loop.
    pub async fn run<S, D, C>(
        &mut self,
        registry: &mut IdentityRegistry<D, C>,
        store: &mut S,
    ) -> Result<(), SweepError>
    where
        S: RegistryStore,
        S::Error: std::fmt::Display,
        D: IssuerDirectory,
        C: TopicCatalog,
    {
        let mut ticker = interval(self.config.sweep_interval());

        tracing::info!(
            interval_secs = self.config.sweep_interval_secs,
            max_claims = self.config.max_claims_per_sweep,
            "sweep worker started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.sweep_once(registry, store) {
                        Ok(()) => {}
                        Err(e) => tracing::error!("Sweep failed: {}", e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping sweep worker");
                    break;
                }
            }
        }

        tracing::info!("Sweep worker stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(())
    }

    /// Run for a specific number of cycles (useful for testing)
    ///
    /// Unlike `run`, a sweep failure here aborts and returns the error.
    pub async fn run_cycles<S, D, C>(
        &mut self,
        registry: &mut IdentityRegistry<D, C>,
        store: &mut S,
        cycles: usize,
    ) -> Result<(), SweepError>
    where
        S: RegistryStore,
        S::Error: std::fmt::Display,
        D: IssuerDirectory,
        C: TopicCatalog,
    {
        let mut ticker = interval(self.config.sweep_interval());

        tracing::info!(
            cycles,
            interval_secs = self.config.sweep_interval_secs,
            "sweep worker started for bounded run"
        );

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!("Starting sweep cycle {}/{}", cycle + 1, cycles);
            self.sweep_once(registry, store)?;
        }

        tracing::info!(
            "Sweep worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );
        Ok(())
    }

    /// One sweep invocation, folded into the metrics
    fn sweep_once<S, D, C>(
        &mut self,
        registry: &mut IdentityRegistry<D, C>,
        store: &mut S,
    ) -> Result<(), SweepError>
    where
        S: RegistryStore,
        S::Error: std::fmt::Display,
        D: IssuerDirectory,
        C: TopicCatalog,
    {
        let start = SystemTime::now();

        let outcome =
            registry.process_expired_claims(store, &self.actor, self.config.max_claims_per_sweep)?;
        self.metrics.record_outcome(&outcome);

        if let Ok(elapsed) = start.elapsed() {
            self.metrics.total_runtime_secs += elapsed.as_secs();
        }

        tracing::info!(
            renewed = outcome.renewed,
            expired = outcome.expired,
            "sweep completed"
        );
        Ok(())
    }
}
