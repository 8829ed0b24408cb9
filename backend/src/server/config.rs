//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::inbound::http::error::DEFAULT_JSON_LIMIT_BYTES;
use backend::inbound::http::state::DEFAULT_MAX_PAGE_SIZE;
use backend::inbound::http::upload::DEFAULT_UPLOAD_LIMIT_BYTES;
use backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) upload_limit_bytes: usize,
    pub(crate) json_limit_bytes: usize,
    pub(crate) max_page_size: u32,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr` with in-memory storage
    /// and default limits.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool; records are then stored in
    /// PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Cap the size of multipart uploads.
    #[must_use]
    pub fn with_upload_limit(mut self, limit_bytes: usize) -> Self {
        self.upload_limit_bytes = limit_bytes;
        self
    }

    /// Cap the size of JSON request bodies.
    #[must_use]
    pub fn with_json_limit(mut self, limit_bytes: usize) -> Self {
        self.json_limit_bytes = limit_bytes;
        self
    }

    /// Cap the page size clients may request.
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
