//! Configuration for the sweep worker
//!
//! Controls how often the worker invokes the registry sweep and how much
//! work each invocation may do.

use crate::SweepError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the background sweep worker
///
/// # Examples
///
/// ```
/// use attestor_sweep::SweepConfig;
///
/// // Default configuration (hourly, 50 claims per call)
/// let config = SweepConfig::default();
/// assert_eq!(config.sweep_interval_secs, 3600);
///
/// // Tight loop for backlogged deployments
/// let config = SweepConfig::aggressive();
/// assert_eq!(config.sweep_interval_secs, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// How often to invoke the sweep (seconds, strictly positive)
    pub sweep_interval_secs: u64,

    /// Work bound passed to each sweep call, in [1, 100]. The registry
    /// additionally caps this with its own configured limit.
    pub max_claims_per_sweep: usize,
}

impl Default for SweepConfig {
    /// Hourly sweeps, 50 claims per call
    fn default() -> Self {
        Self {
            sweep_interval_secs: 3600,
            max_claims_per_sweep: 50,
        }
    }
}

impl SweepConfig {
    /// Frequent, full-width sweeps for working through a backlog
    ///
    /// - Interval: 5 minutes
    /// - Claims per call: 100
    pub fn aggressive() -> Self {
        Self {
            sweep_interval_secs: 300,
            max_claims_per_sweep: 100,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.sweep_interval_secs == 0 {
            return Err(SweepError::Config(
                "sweep interval must be positive".to_string(),
            ));
        }
        if self.max_claims_per_sweep == 0 || self.max_claims_per_sweep > 100 {
            return Err(SweepError::Config(format!(
                "max claims per sweep {} is outside [1, 100]",
                self.max_claims_per_sweep
            )));
        }
        Ok(())
    }

    /// Get the sweep interval as Duration
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
