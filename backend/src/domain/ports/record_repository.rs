//! Port for record persistence.
//!
//! The [`RecordRepository`] trait is the storage backend the record service
//! drives. Email uniqueness is not a storage concern: adapters store whatever
//! the service hands them.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewRecord, Record, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record repository adapters.
    pub enum RecordRepositoryError {
        /// Repository connection could not be established.
        Connection { message } =>
            "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } =>
            "record repository query failed: {message}",
    }
}

/// Port for record storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Fetch every stored record whose email is one of `emails`.
    async fn find_all_by_email_in(
        &self,
        emails: &[String],
    ) -> Result<Vec<Record>, RecordRepositoryError>;

    /// Fetch the record holding `email`, if any.
    ///
    /// When storage holds several (possible only through out-of-band writes),
    /// the one with the lowest identifier is returned.
    async fn find_by_email(&self, email: &str) -> Result<Option<Record>, RecordRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, RecordRepositoryError>;

    /// Report whether a record with `id` exists.
    async fn exists_by_id(&self, id: RecordId) -> Result<bool, RecordRepositoryError>;

    /// Insert `records` in one operation, returning them with identifiers in
    /// input order.
    async fn save_all(&self, records: &[NewRecord]) -> Result<Vec<Record>, RecordRepositoryError>;

    /// Overwrite an existing record and return the stored value.
    async fn save(&self, record: &Record) -> Result<Record, RecordRepositoryError>;

    /// Remove the record with `id`. Absent identifiers are ignored.
    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordRepositoryError>;

    /// Every stored record ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Record>, RecordRepositoryError>;

    /// One page of records ordered by identifier, with the total count.
    async fn find_page(&self, request: PageRequest) -> Result<Page<Record>, RecordRepositoryError>;
}
