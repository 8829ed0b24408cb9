//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RecordsCommand, RecordsQuery};

/// Default cap on the page size accepted by paginated listings.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub records: Arc<dyn RecordsCommand>,
    pub records_query: Arc<dyn RecordsQuery>,
    /// Largest page size a client may request.
    pub max_page_size: u32,
}

impl HttpState {
    /// Construct state from the record ports with the default page-size cap.
    pub fn new(records: Arc<dyn RecordsCommand>, records_query: Arc<dyn RecordsQuery>) -> Self {
        Self {
            records,
            records_query,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Override the page-size cap.
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }
}
