//! Error types for sweep worker operations

use thiserror::Error;

/// Errors that can occur while driving the expiration sweep
#[derive(Error, Debug)]
pub enum SweepError {
    /// The registry rejected or failed a sweep call
    #[error("Registry error: {0}")]
    Registry(#[from] attestor_registry::RegistryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
