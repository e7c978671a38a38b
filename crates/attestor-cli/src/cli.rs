//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Attestor CLI - operate the identity/claims registry.
#[derive(Debug, Parser)]
#[command(name = "attestor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ~/.attestor/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register one or more identities (two or more run as a batch)
    Register(RegisterArgs),

    /// Issue a claim for an identity
    AddClaim(AddClaimArgs),

    /// Show registration info for an identity
    Info(InfoArgs),

    /// Check verification status for one or more identities
    Verify(VerifyArgs),

    /// List identities with claims expiring soon
    Expiring(ExpiringArgs),

    /// Process expired claims (once, or continuously with --watch)
    Sweep(SweepArgs),

    /// Show the resolved configuration
    Config,
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Identity ids to register
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the add-claim command.
#[derive(Debug, Parser)]
pub struct AddClaimArgs {
    /// Subject identity id
    pub identity: String,

    /// Claim topic (kyc_approved, aml_cleared, accredited_investor,
    /// residency_verified)
    pub topic: String,

    /// Claim payload (stored as opaque bytes)
    #[arg(short, long, default_value = "")]
    pub data: String,

    /// Explicit expiry (seconds since Unix epoch); omitted means now plus
    /// the configured default period
    #[arg(short, long)]
    pub expires_at: Option<u64>,

    /// Opt this claim into sweep-time auto-renewal
    #[arg(long)]
    pub auto_renew: bool,
}

/// Arguments for the info command.
#[derive(Debug, Parser)]
pub struct InfoArgs {
    /// Identity id to look up
    pub id: String,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Identity ids to check
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the expiring command.
#[derive(Debug, Parser)]
pub struct ExpiringArgs {
    /// Look-ahead window in seconds
    #[arg(short, long, default_value_t = 2_592_000)]
    pub within: u64,
}

/// Arguments for the sweep command.
#[derive(Debug, Parser)]
pub struct SweepArgs {
    /// Most claims to process in one pass (defaults to the profile's
    /// sweep setting)
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Keep sweeping at the configured interval until interrupted
    #[arg(long)]
    pub watch: bool,
}
