//! Terminal output formatting.

use attestor_domain::{BatchResult, ClaimTopic, IdentityId};
use attestor_registry::{IdentityInfo, SweepOutcome};
use colored::Colorize;

/// Formats command results for the terminal.
pub struct Formatter {
    color: bool,
}

impl Formatter {
    /// Create a formatter; `color` toggles ANSI styling.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn ok(&self, s: &str) -> String {
        if self.color {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn bad(&self, s: &str) -> String {
        if self.color {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    /// One registered identity.
    pub fn registered(&self, id: &IdentityId) -> String {
        format!("{} registered {}", self.ok("ok"), id)
    }

    /// One issued claim.
    pub fn claim_added(&self, topic: ClaimTopic, id: &IdentityId, expires_at: u64) -> String {
        format!(
            "{} {} claim for {} expires at {}",
            self.ok("ok"),
            topic,
            id,
            expires_at
        )
    }

    /// A batch outcome with per-item failures listed.
    pub fn batch_summary(&self, result: &BatchResult) -> String {
        let mut lines = vec![format!(
            "batch {}: {} succeeded, {} failed",
            result.id, result.success_count, result.failure_count
        )];
        for (index, reason) in result.failed_indices.iter().zip(&result.failure_reasons) {
            lines.push(format!("  {} item {}: {}", self.bad("failed"), index, reason));
        }
        lines.join("\n")
    }

    /// Registration info for one identity.
    pub fn info(&self, id: &IdentityId, info: &IdentityInfo) -> String {
        if !info.exists {
            return format!("{}: {}", id, self.bad("not registered"));
        }
        format!(
            "{}: registered at {}, auto-renewal {}",
            id,
            info.registered_at.unwrap_or_default(),
            if info.auto_renewal.unwrap_or_default() {
                self.ok("on")
            } else {
                self.bad("off")
            }
        )
    }

    /// One verification check line.
    pub fn verification(&self, id: &IdentityId, verified: bool) -> String {
        let status = if verified {
            self.ok("verified")
        } else {
            self.bad("unverified")
        };
        format!("{}: {}", id, status)
    }

    /// A sweep pass outcome.
    pub fn sweep(&self, outcome: &SweepOutcome) -> String {
        format!(
            "sweep processed {} claims ({} renewed, {} expired)",
            outcome.processed(),
            outcome.renewed,
            outcome.expired
        )
    }
}
