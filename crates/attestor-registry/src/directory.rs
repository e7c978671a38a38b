//! In-memory trusted issuer directory
//!
//! The registry only depends on the `IssuerDirectory` trait; this is the
//! shipped implementation for deployments that manage trust in-process.
//! Trust is consulted at call time, so revocations here are observed by
//! the very next issuance or renewal evaluation.

use attestor_domain::traits::IssuerDirectory;
use attestor_domain::{ClaimTopic, IdentityId};
use std::collections::{HashMap, HashSet};

/// Tracks which issuers are authorized to assert which claim topics
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssuerDirectory {
    trusted: HashMap<IdentityId, HashSet<ClaimTopic>>,
}

impl InMemoryIssuerDirectory {
    /// Create an empty directory (no issuer trusted for anything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `issuer` trust for `topic`
    pub fn trust(&mut self, issuer: IdentityId, topic: ClaimTopic) {
        self.trusted.entry(issuer).or_default().insert(topic);
    }

    /// Grant `issuer` trust for several topics at once
    pub fn trust_many(&mut self, issuer: IdentityId, topics: impl IntoIterator<Item = ClaimTopic>) {
        self.trusted.entry(issuer).or_default().extend(topics);
    }

    /// Revoke `issuer`'s trust for `topic`; returns whether it was held
    pub fn revoke(&mut self, issuer: &IdentityId, topic: ClaimTopic) -> bool {
        match self.trusted.get_mut(issuer) {
            Some(topics) => topics.remove(&topic),
            None => false,
        }
    }

    /// Remove `issuer` entirely; returns whether it was known
    pub fn remove_issuer(&mut self, issuer: &IdentityId) -> bool {
        self.trusted.remove(issuer).is_some()
    }

    /// Topics `issuer` is currently trusted for
    pub fn topics_for(&self, issuer: &IdentityId) -> Vec<ClaimTopic> {
        let mut topics: Vec<ClaimTopic> = self
            .trusted
            .get(issuer)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        topics.sort();
        topics
    }
}

impl IssuerDirectory for InMemoryIssuerDirectory {
    fn is_trusted_for(&self, issuer: &IdentityId, topic: ClaimTopic) -> bool {
        self.trusted
            .get(issuer)
            .is_some_and(|topics| topics.contains(&topic))
    }
}
