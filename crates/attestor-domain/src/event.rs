//! Registry notifications - observable by external layers (audit logging,
//! reminder services) via an in-process observer list

use crate::batch::BatchId;
use crate::identity::IdentityId;
use crate::topic::ClaimTopic;
use std::sync::{Arc, Mutex};

/// A notification emitted by the registry.
///
/// The contract is *which* notifications fire under *which* conditions, not
/// the transport; sinks may forward these to logs, queues, or test buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A new identity was registered
    IdentityRegistered {
        /// The registered identity
        identity: IdentityId,
        /// Registration timestamp (seconds since Unix epoch)
        registered_at: u64,
    },

    /// A claim was added (or replaced) for an identity
    ClaimAdded {
        /// The claim's subject identity
        identity: IdentityId,
        /// The claim topic
        topic: ClaimTopic,
        /// The asserting issuer
        issuer: IdentityId,
        /// Resolved expiry timestamp
        expires_at: u64,
    },

    /// The sweep renewed an expired claim
    ClaimRenewed {
        /// The claim's subject identity
        identity: IdentityId,
        /// The claim topic
        topic: ClaimTopic,
        /// The advanced expiry timestamp
        expires_at: u64,
        /// Renewal count after this renewal
        renewal_count: u32,
    },

    /// The sweep expired a claim
    ClaimExpired {
        /// The claim's subject identity
        identity: IdentityId,
        /// The claim topic
        topic: ClaimTopic,
        /// The expiry timestamp the claim was removed with
        expires_at: u64,
    },

    /// An identity's auto-renewal opt-in was toggled
    AutoRenewalStatusChanged {
        /// The affected identity
        identity: IdentityId,
        /// The new setting
        enabled: bool,
    },

    /// The expiration configuration was replaced
    ExpirationConfigUpdated {
        /// New default expiration period in seconds
        default_expiration_secs: u64,
        /// New renewal grace period in seconds
        renewal_grace_secs: u64,
        /// New per-sweep claim limit
        batch_expiration_check_limit: u32,
        /// New auto-expiration switch
        auto_expiration_enabled: bool,
    },

    /// A batch operation completed and its result was persisted
    BatchCompleted {
        /// The result's retrieval id
        batch_id: BatchId,
        /// Items that succeeded
        success_count: usize,
        /// Items that failed
        failure_count: usize,
    },
}

/// Receiver for registry notifications
pub trait EventSink {
    /// Called synchronously for every emitted event, in emission order
    fn on_event(&self, event: &RegistryEvent);
}

/// An in-memory recording sink, cloneable across the registry boundary.
///
/// # Examples
///
/// ```
/// use attestor_domain::{EventLog, EventSink, RegistryEvent, IdentityId};
///
/// let log = EventLog::new();
/// let sink = log.clone();
/// sink.on_event(&RegistryEvent::IdentityRegistered {
///     identity: IdentityId::parse("investor-1").unwrap(),
///     registered_at: 1000,
/// });
/// assert_eq!(log.events().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<RegistryEvent>>>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in emission order
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Drop all recorded events
    pub fn clear(&self) {
        self.events.lock().expect("event log poisoned").clear();
    }
}

impl EventSink for EventLog {
    fn on_event(&self, event: &RegistryEvent) {
        self.events
            .lock()
            .expect("event log poisoned")
            .push(event.clone());
    }
}
