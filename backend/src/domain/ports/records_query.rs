//! Driving port for record listings.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Record};

/// Domain use-case port for reading records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsQuery: Send + Sync {
    /// Every stored record ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Record>, Error>;

    /// One page of records ordered by identifier.
    async fn list_page(&self, request: PageRequest) -> Result<Page<Record>, Error>;
}
