//! Expiration configuration
//!
//! Process-wide tunables read by the lifecycle engine on every claim
//! creation and sweep.

use crate::RegistryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DAY_SECS: u64 = 86_400;

/// Tunable expiration parameters
///
/// All four fields are replaced atomically by a successful update; a
/// rejected update leaves the prior configuration untouched.
///
/// # Examples
///
/// ```
/// use attestor_registry::ExpirationConfig;
///
/// // Default configuration (annual claims, monthly grace window)
/// let config = ExpirationConfig::default();
/// assert_eq!(config.default_expiration_secs, 365 * 86_400);
///
/// // Short-lived claims, small sweep batches
/// let config = ExpirationConfig::strict();
/// assert_eq!(config.batch_expiration_check_limit, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationConfig {
    /// Expiry period applied when a claim is issued without an explicit
    /// expiry, and added on every renewal (seconds, strictly positive)
    pub default_expiration_secs: u64,

    /// Window before expiry in which a claim counts as expiring soon
    /// (seconds, strictly positive)
    pub renewal_grace_secs: u64,

    /// Most claims one sweep call will process, in [1, 100]
    pub batch_expiration_check_limit: u32,

    /// Master switch for sweep-time auto-renewal; when off, expired claims
    /// are always removed
    #[serde(default = "default_auto_expiration")]
    pub auto_expiration_enabled: bool,
}

fn default_auto_expiration() -> bool {
    true
}

impl Default for ExpirationConfig {
    /// Annual expiry, 30-day grace, 50-claim sweeps, renewal on
    fn default() -> Self {
        Self {
            default_expiration_secs: 365 * DAY_SECS,
            renewal_grace_secs: 30 * DAY_SECS,
            batch_expiration_check_limit: 50,
            auto_expiration_enabled: true,
        }
    }
}

impl ExpirationConfig {
    /// Short-lived claims for high-churn compliance regimes
    ///
    /// - Expiry: 90 days
    /// - Grace: 7 days
    /// - Sweep limit: 25
    pub fn strict() -> Self {
        Self {
            default_expiration_secs: 90 * DAY_SECS,
            renewal_grace_secs: 7 * DAY_SECS,
            batch_expiration_check_limit: 25,
            auto_expiration_enabled: true,
        }
    }

    /// Long-lived claims for low-churn environments
    ///
    /// - Expiry: 2 years
    /// - Grace: 90 days
    /// - Sweep limit: 100
    pub fn lenient() -> Self {
        Self {
            default_expiration_secs: 2 * 365 * DAY_SECS,
            renewal_grace_secs: 90 * DAY_SECS,
            batch_expiration_check_limit: 100,
            auto_expiration_enabled: true,
        }
    }

    /// Validate all fields; used by the registry before accepting a config
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.default_expiration_secs == 0 {
            return Err(RegistryError::InvalidPeriod);
        }
        if self.renewal_grace_secs == 0 {
            return Err(RegistryError::InvalidGracePeriod);
        }
        if self.batch_expiration_check_limit == 0 || self.batch_expiration_check_limit > 100 {
            return Err(RegistryError::InvalidBatchLimit(
                self.batch_expiration_check_limit,
            ));
        }
        Ok(())
    }

    /// Get the default expiration period as Duration
    pub fn default_expiration(&self) -> Duration {
        Duration::from_secs(self.default_expiration_secs)
    }

    /// Get the renewal grace period as Duration
    pub fn renewal_grace(&self) -> Duration {
        Duration::from_secs(self.renewal_grace_secs)
    }
}
