//! Driving port for record mutations.
//!
//! HTTP handlers call [`RecordsCommand`] to ingest batches, apply updates and
//! delete records without knowing which storage adapter sits behind it.

use async_trait::async_trait;

use crate::domain::{BulkIngestOutcome, Error, Record, RecordDraft, RecordId};

/// Driving port for record mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsCommand: Send + Sync {
    /// Validate, deduplicate and persist a batch of candidates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the batch is
    /// empty or carries no usable email, and an internal error when storage
    /// fails. Per-candidate failures are reported in the outcome instead.
    async fn ingest(&self, drafts: Vec<RecordDraft>) -> Result<BulkIngestOutcome, Error>;

    /// Decode a spreadsheet upload and ingest its rows as a batch.
    ///
    /// # Errors
    ///
    /// As [`RecordsCommand::ingest`], plus an invalid-request error when the
    /// bytes cannot be decoded.
    async fn ingest_spreadsheet(&self, bytes: &[u8]) -> Result<BulkIngestOutcome, Error>;

    /// Replace name, email and age of an existing record.
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown identifiers, invalid-request carrying the
    /// first violation when the replacement fails validation, and conflict
    /// when the email is held by another record or nothing would change.
    async fn update(&self, id: RecordId, draft: RecordDraft) -> Result<Record, Error>;

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown identifiers.
    async fn delete(&self, id: RecordId) -> Result<(), Error>;
}
