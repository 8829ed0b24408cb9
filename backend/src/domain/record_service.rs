//! Record domain service.
//!
//! Implements the [`RecordsCommand`] and [`RecordsQuery`] driving ports on top
//! of a [`RecordRepository`], a [`RecordValidator`] and a
//! [`SpreadsheetDecoder`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    RecordRepository, RecordRepositoryError, RecordsCommand, RecordsQuery, SpreadsheetDecodeError,
    SpreadsheetDecoder,
};
use crate::domain::{
    BulkIngestOutcome, Error, NewRecord, Record, RecordDraft, RecordId, RecordValidator, Violations,
    bulk_ingest,
};

/// Record service implementing the driving ports.
pub struct RecordService<R: ?Sized, V: ?Sized, D: ?Sized> {
    repository: Arc<R>,
    validator: Arc<V>,
    decoder: Arc<D>,
}

impl<R: ?Sized, V: ?Sized, D: ?Sized> Clone for RecordService<R, V, D> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            validator: Arc::clone(&self.validator),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<R: ?Sized, V: ?Sized, D: ?Sized> RecordService<R, V, D> {
    /// Create a new service from its collaborators.
    pub fn new(repository: Arc<R>, validator: Arc<V>, decoder: Arc<D>) -> Self {
        Self {
            repository,
            validator,
            decoder,
        }
    }
}

fn map_repository_error(error: RecordRepositoryError) -> Error {
    warn!(kind = error.kind(), %error, "record repository call failed");
    Error::internal(error.to_string())
}

fn map_decode_error(error: SpreadsheetDecodeError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "code": "spreadsheet_decode_failed",
    }))
}

/// Details code marking an update rejected by the validator.
pub const VALIDATION_FAILED: &str = "validation_failed";

fn validation_error(violations: &Violations) -> Error {
    let rejected: Vec<_> = violations
        .iter()
        .map(|violation| {
            json!({
                "field": violation.field,
                "rejectedValue": violation.rejected_value,
                "error": violation.message,
            })
        })
        .collect();
    Error::invalid_request(violations.first().message.clone()).with_details(json!({
        "code": VALIDATION_FAILED,
        "invalidCount": rejected.len(),
        "invalidRecords": rejected,
    }))
}

fn not_found(id: RecordId) -> Error {
    Error::not_found(format!("Record with id {id} not found"))
}

impl<R, V, D> RecordService<R, V, D>
where
    R: RecordRepository + ?Sized,
    V: RecordValidator + ?Sized,
    D: SpreadsheetDecoder + ?Sized,
{
    async fn existing_emails(&self, emails: &[String]) -> Result<HashSet<String>, Error> {
        let stored = self
            .repository
            .find_all_by_email_in(emails)
            .await
            .map_err(map_repository_error)?;
        Ok(stored.into_iter().map(|record| record.email).collect())
    }

    async fn ensure_email_available(
        &self,
        id: RecordId,
        candidate: &NewRecord,
    ) -> Result<(), Error> {
        let Some(holder) = self
            .repository
            .find_by_email(&candidate.email)
            .await
            .map_err(map_repository_error)?
        else {
            return Ok(());
        };

        if holder.id != id {
            return Err(Error::conflict(format!(
                "Email already exists: {}",
                candidate.email
            )));
        }
        if holder.name == candidate.name && holder.age == candidate.age {
            return Err(Error::conflict("Record already exists with same data"));
        }
        Ok(())
    }
}

#[async_trait]
impl<R, V, D> RecordsCommand for RecordService<R, V, D>
where
    R: RecordRepository + ?Sized,
    V: RecordValidator + ?Sized,
    D: SpreadsheetDecoder + ?Sized + 'static,
{
    async fn ingest(&self, drafts: Vec<RecordDraft>) -> Result<BulkIngestOutcome, Error> {
        let emails = bulk_ingest::request_emails(&drafts)?;
        let existing = self.existing_emails(&emails).await?;

        let received = drafts.len();
        let plan = bulk_ingest::plan(drafts, &existing, self.validator.as_ref());

        let saved = if plan.accepted.is_empty() {
            Vec::new()
        } else {
            self.repository
                .save_all(&plan.accepted)
                .await
                .map_err(map_repository_error)?
        };

        let outcome = BulkIngestOutcome {
            saved,
            invalid: plan.rejected,
        };
        info!(
            received,
            saved = outcome.saved_count(),
            invalid = outcome.invalid_count(),
            "bulk ingest processed"
        );
        Ok(outcome)
    }

    async fn ingest_spreadsheet(&self, bytes: &[u8]) -> Result<BulkIngestOutcome, Error> {
        let decoder = Arc::clone(&self.decoder);
        let owned = bytes.to_vec();
        let drafts = tokio::task::spawn_blocking(move || decoder.decode(&owned))
            .await
            .map_err(|err| Error::internal(format!("spreadsheet decoding aborted: {err}")))?
            .map_err(map_decode_error)?;
        info!(rows = drafts.len(), "spreadsheet decoded");
        self.ingest(drafts).await
    }

    async fn update(&self, id: RecordId, draft: RecordDraft) -> Result<Record, Error> {
        let existing = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))?;

        let changes = self
            .validator
            .validate(&draft)
            .map_err(|violations| validation_error(&violations))?;

        self.ensure_email_available(id, &changes).await?;

        let updated = self
            .repository
            .save(&existing.with_changes(changes))
            .await
            .map_err(map_repository_error)?;
        info!(record_id = %updated.id, "record updated");
        Ok(updated)
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let exists = self
            .repository
            .exists_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if !exists {
            return Err(not_found(id));
        }

        self.repository
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        info!(record_id = %id, "record deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, V, D> RecordsQuery for RecordService<R, V, D>
where
    R: RecordRepository + ?Sized,
    V: RecordValidator + ?Sized,
    D: SpreadsheetDecoder + ?Sized,
{
    async fn list_all(&self) -> Result<Vec<Record>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Record>, Error> {
        self.repository
            .find_page(request)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "record_service_tests.rs"]
mod tests;
