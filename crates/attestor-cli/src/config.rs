//! Configuration management for the CLI.
//!
//! One TOML profile supplies everything a command needs to build the
//! registry: the database path, the acting identity and its roles, the
//! required-topic set, and the trusted issuer entries loaded into the
//! in-memory directory at startup.

use crate::error::{CliError, Result};
use attestor_domain::{Actor, ClaimTopic, IdentityId, Role, StandardCatalog};
use attestor_registry::{ExpirationConfig, InMemoryIssuerDirectory};
use attestor_sweep::SweepConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database
    #[serde(default = "default_database")]
    pub database: String,

    /// The acting identity and its roles
    #[serde(default)]
    pub actor: ActorConfig,

    /// Topics an identity must hold active claims for to be verified
    #[serde(default = "default_required_topics")]
    pub required_topics: Vec<String>,

    /// Issuer id -> topics that issuer is trusted to assert
    #[serde(default)]
    pub trusted_issuers: BTreeMap<String, Vec<String>>,

    /// Registry expiration tunables
    #[serde(default)]
    pub expiration: ExpirationConfig,

    /// Sweep worker settings (used by `attestor sweep --watch`)
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// The acting identity for registry calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Caller identity id
    pub id: String,

    /// Roles the caller holds
    pub roles: Vec<String>,
}

fn default_database() -> String {
    "attestor.db".to_string()
}

fn default_required_topics() -> Vec<String> {
    vec!["kyc_approved".to_string(), "aml_cleared".to_string()]
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            id: "admin".to_string(),
            roles: vec![
                "admin".to_string(),
                "operator".to_string(),
                "issuer".to_string(),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            actor: ActorConfig::default(),
            required_topics: default_required_topics(),
            trusted_issuers: BTreeMap::new(),
            expiration: ExpirationConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".attestor").join("config.toml"))
    }

    /// Load configuration from an explicit path, or the default path,
    /// falling back to defaults when no file exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Build the acting identity from the profile.
    pub fn actor(&self) -> Result<Actor> {
        let id = IdentityId::parse(&self.actor.id).map_err(CliError::Config)?;
        let mut roles = Vec::new();
        for name in &self.actor.roles {
            let role = Role::parse(name)
                .ok_or_else(|| CliError::Config(format!("Unknown role: {}", name)))?;
            roles.push(role);
        }
        Ok(Actor::new(id, roles))
    }

    /// Build the topic catalog from the profile.
    pub fn catalog(&self) -> Result<StandardCatalog> {
        let mut required = Vec::new();
        for name in &self.required_topics {
            let topic = ClaimTopic::parse(name)
                .ok_or_else(|| CliError::Config(format!("Unknown claim topic: {}", name)))?;
            required.push(topic);
        }
        Ok(StandardCatalog::with_required(required))
    }

    /// Build the trusted issuer directory from the profile.
    pub fn directory(&self) -> Result<InMemoryIssuerDirectory> {
        let mut directory = InMemoryIssuerDirectory::new();
        for (issuer, topics) in &self.trusted_issuers {
            let issuer = IdentityId::parse(issuer).map_err(CliError::Config)?;
            for name in topics {
                let topic = ClaimTopic::parse(name)
                    .ok_or_else(|| CliError::Config(format!("Unknown claim topic: {}", name)))?;
                directory.trust(issuer.clone(), topic);
            }
        }
        Ok(directory)
    }
}
