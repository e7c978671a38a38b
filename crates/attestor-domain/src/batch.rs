//! Batch module - identifiers and aggregated results for multi-item operations

use std::fmt;

/// Unique identifier for a batch operation based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for audit queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for distributed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(u128);

impl BatchId {
    /// Generate a new UUIDv7-based BatchId
    ///
    /// # Examples
    ///
    /// ```
    /// use attestor_domain::BatchId;
    ///
    /// let id = BatchId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a BatchId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a BatchId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use attestor_domain::BatchId;
    ///
    /// let id = BatchId::new();
    /// let id_str = id.to_string();
    /// let parsed = BatchId::from_string(&id_str).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// The kind of multi-item operation a batch result records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    /// Bulk identity registration
    RegisterIdentities,

    /// Bulk claim issuance
    AddClaims,
}

impl BatchOperation {
    /// Get the operation name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchOperation::RegisterIdentities => "register_identities",
            BatchOperation::AddClaims => "add_claims",
        }
    }

    /// Parse an operation from a string name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "register_identities" => Some(BatchOperation::RegisterIdentities),
            "add_claims" => Some(BatchOperation::AddClaims),
            _ => None,
        }
    }
}

/// The immutable record of one batch operation's outcome.
///
/// Batch calls are NOT atomic across items: success of item i is
/// independent of item j. Per-item failures are captured here (index plus
/// human-readable reason) rather than raised, so callers can act on
/// successes even when some items fail.
///
/// Invariants: `failed_indices.len() == failure_reasons.len() ==
/// failure_count` and `success_count + failure_count == input_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Identifier this result is retrievable by
    pub id: BatchId,

    /// Which operation produced this result
    pub operation: BatchOperation,

    /// Number of items in the input
    pub input_size: usize,

    /// Items that succeeded
    pub success_count: usize,

    /// Items that failed
    pub failure_count: usize,

    /// Input positions of the failed items, in input order
    pub failed_indices: Vec<usize>,

    /// Human-readable failure reasons, parallel to `failed_indices`
    pub failure_reasons: Vec<String>,
}

impl BatchResult {
    /// Start a result for a batch of `input_size` items
    pub fn new(operation: BatchOperation, input_size: usize) -> Self {
        Self {
            id: BatchId::new(),
            operation,
            input_size,
            success_count: 0,
            failure_count: 0,
            failed_indices: Vec::new(),
            failure_reasons: Vec::new(),
        }
    }

    /// Record one successful item
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Record one failed item with its input position and reason
    pub fn record_failure(&mut self, index: usize, reason: impl Into<String>) {
        self.failure_count += 1;
        self.failed_indices.push(index);
        self.failure_reasons.push(reason.into());
    }

    /// Check the structural invariants of this result
    pub fn is_consistent(&self) -> bool {
        self.failed_indices.len() == self.failure_count
            && self.failure_reasons.len() == self.failure_count
            && self.success_count + self.failure_count == self.input_size
    }
}
