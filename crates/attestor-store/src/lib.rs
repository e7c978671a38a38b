//! Attestor Storage Layer
//!
//! Implements the `RegistryStore` trait using SQLite.
//!
//! # Architecture
//!
//! - `identities`: one row per registered identity, point lookup by id
//! - `claims`: one row per (identity, topic), indexed on `expires_at` for
//!   the sweep scan and expiring-soon range reads
//! - `batch_results`: immutable audit records, indices/reasons as JSON
//!
//! # Examples
//!
//! ```no_run
//! use attestor_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for registry operations
//! ```

#![warn(missing_docs)]

use attestor_domain::traits::RegistryStore;
use attestor_domain::{BatchId, BatchOperation, BatchResult, Claim, ClaimTopic, IdentityId, IdentityRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// JSON column (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQLite-based implementation of `RegistryStore`
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// SqliteStore instance, or the store should live behind a single writer.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use attestor_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("attestor.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Convert BatchId to bytes for storage
    fn batch_id_to_bytes(id: BatchId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    /// Convert bytes to BatchId
    fn bytes_to_batch_id(bytes: &[u8]) -> Result<BatchId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for BatchId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(BatchId::from_value(u128::from_be_bytes(arr)))
    }

    /// Map a claims row (identity_id, topic, issuer, data, issued_at,
    /// expires_at, auto_renewal, renewal_count) to its domain pair
    fn row_to_claim(row: &Row<'_>) -> rusqlite::Result<(IdentityId, Claim)> {
        let identity_str: String = row.get(0)?;
        let identity = IdentityId::parse(&identity_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let topic_code: u32 = row.get(1)?;
        let topic = ClaimTopic::from_code(topic_code).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Integer,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown topic code: {}",
                    topic_code
                ))),
            )
        })?;

        let issuer_str: String = row.get(2)?;
        let issuer = IdentityId::parse(&issuer_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        Ok((
            identity,
            Claim {
                topic,
                issuer,
                data: row.get(3)?,
                issued_at: row.get::<_, i64>(4)? as u64,
                expires_at: row.get::<_, i64>(5)? as u64,
                auto_renewal: row.get(6)?,
                renewal_count: row.get::<_, i64>(7)? as u32,
            },
        ))
    }
}

impl RegistryStore for SqliteStore {
    type Error = StoreError;

    fn put_identity(&mut self, record: IdentityRecord) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO identities (id, registered_at, auto_renewal)
             VALUES (?1, ?2, ?3)",
            params![
                record.id.as_str(),
                record.registered_at as i64,
                record.auto_renewal,
            ],
        )?;
        Ok(())
    }

    fn get_identity(&self, id: &IdentityId) -> Result<Option<IdentityRecord>, Self::Error> {
        let record = self
            .conn
            .query_row(
                "SELECT id, registered_at, auto_renewal FROM identities WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    let id_str: String = row.get(0)?;
                    let id = IdentityId::parse(&id_str).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            Box::new(StoreError::InvalidData(e)),
                        )
                    })?;
                    Ok(IdentityRecord {
                        id,
                        registered_at: row.get::<_, i64>(1)? as u64,
                        auto_renewal: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(record)
    }

    fn put_claim(&mut self, identity: &IdentityId, claim: Claim) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO claims
             (identity_id, topic, issuer, data, issued_at, expires_at, auto_renewal, renewal_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                identity.as_str(),
                claim.topic.code(),
                claim.issuer.as_str(),
                claim.data,
                claim.issued_at as i64,
                claim.expires_at as i64,
                claim.auto_renewal,
                claim.renewal_count as i64,
            ],
        )?;
        Ok(())
    }

    fn get_claim(
        &self,
        identity: &IdentityId,
        topic: ClaimTopic,
    ) -> Result<Option<Claim>, Self::Error> {
        let claim = self
            .conn
            .query_row(
                "SELECT identity_id, topic, issuer, data, issued_at, expires_at, auto_renewal, renewal_count
                 FROM claims WHERE identity_id = ?1 AND topic = ?2",
                params![identity.as_str(), topic.code()],
                |row| Self::row_to_claim(row).map(|(_, claim)| claim),
            )
            .optional()?;

        Ok(claim)
    }

    fn remove_claim(
        &mut self,
        identity: &IdentityId,
        topic: ClaimTopic,
    ) -> Result<bool, Self::Error> {
        let affected = self.conn.execute(
            "DELETE FROM claims WHERE identity_id = ?1 AND topic = ?2",
            params![identity.as_str(), topic.code()],
        )?;
        Ok(affected > 0)
    }

    fn claims_due(
        &self,
        cutoff: u64,
        limit: usize,
    ) -> Result<Vec<(IdentityId, Claim)>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT identity_id, topic, issuer, data, issued_at, expires_at, auto_renewal, renewal_count
             FROM claims WHERE expires_at <= ?1
             ORDER BY expires_at, identity_id, topic
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![cutoff as i64, limit as i64], Self::row_to_claim)?;

        let mut due = Vec::new();
        for row in rows {
            due.push(row?);
        }
        Ok(due)
    }

    fn claims_expiring_between(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<(IdentityId, Claim)>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT identity_id, topic, issuer, data, issued_at, expires_at, auto_renewal, renewal_count
             FROM claims WHERE expires_at >= ?1 AND expires_at <= ?2
             ORDER BY expires_at, identity_id, topic",
        )?;

        let rows = stmt.query_map(params![from as i64, to as i64], Self::row_to_claim)?;

        let mut expiring = Vec::new();
        for row in rows {
            expiring.push(row?);
        }
        Ok(expiring)
    }

    fn put_batch_result(&mut self, result: BatchResult) -> Result<(), Self::Error> {
        let indices = serde_json::to_string(&result.failed_indices)?;
        let reasons = serde_json::to_string(&result.failure_reasons)?;

        // Plain INSERT: batch results are immutable once written
        self.conn.execute(
            "INSERT INTO batch_results
             (id, operation, input_size, success_count, failure_count, failed_indices, failure_reasons)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                Self::batch_id_to_bytes(result.id),
                result.operation.as_str(),
                result.input_size as i64,
                result.success_count as i64,
                result.failure_count as i64,
                indices,
                reasons,
            ],
        )?;
        Ok(())
    }

    fn get_batch_result(&self, id: BatchId) -> Result<Option<BatchResult>, Self::Error> {
        let row = self
            .conn
            .query_row(
                "SELECT id, operation, input_size, success_count, failure_count, failed_indices, failure_reasons
                 FROM batch_results WHERE id = ?1",
                params![Self::batch_id_to_bytes(id)],
                |row| {
                    let id_bytes: Vec<u8> = row.get(0)?;
                    let operation: String = row.get(1)?;
                    let input_size: i64 = row.get(2)?;
                    let success_count: i64 = row.get(3)?;
                    let failure_count: i64 = row.get(4)?;
                    let indices: String = row.get(5)?;
                    let reasons: String = row.get(6)?;
                    Ok((id_bytes, operation, input_size, success_count, failure_count, indices, reasons))
                },
            )
            .optional()?;

        let Some((id_bytes, operation, input_size, success_count, failure_count, indices, reasons)) =
            row
        else {
            return Ok(None);
        };

        let operation = BatchOperation::parse(&operation).ok_or_else(|| {
            StoreError::InvalidData(format!("Unknown batch operation: {}", operation))
        })?;

        Ok(Some(BatchResult {
            id: Self::bytes_to_batch_id(&id_bytes)?,
            operation,
            input_size: input_size as usize,
            success_count: success_count as usize,
            failure_count: failure_count as usize,
            failed_indices: serde_json::from_str(&indices)?,
            failure_reasons: serde_json::from_str(&reasons)?,
        }))
    }
}
