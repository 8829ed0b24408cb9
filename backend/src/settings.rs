//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI arguments, `RECORDS_*` environment variables and an
//! optional configuration file. Unset values fall back to the defaults below;
//! without a database URL the server keeps records in memory.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::error::DEFAULT_JSON_LIMIT_BYTES;
use crate::inbound::http::state::DEFAULT_MAX_PAGE_SIZE;
use crate::inbound::http::upload::DEFAULT_UPLOAD_LIMIT_BYTES;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration values for the records server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDS")]
pub struct ServerSettings {
    /// Address to bind.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string; in-memory storage when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply pending migrations before serving.
    pub run_migrations: Option<bool>,
    /// Largest accepted multipart upload, in bytes.
    pub upload_limit_bytes: Option<usize>,
    /// Largest accepted JSON body, in bytes.
    pub json_limit_bytes: Option<usize>,
    /// Largest page size a client may request.
    pub max_page_size: Option<u32>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Connection pool size.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether pending migrations run at startup; on unless disabled.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Upload size limit in bytes.
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes
            .unwrap_or(DEFAULT_UPLOAD_LIMIT_BYTES)
    }

    /// JSON body size limit in bytes.
    pub fn json_limit_bytes(&self) -> usize {
        self.json_limit_bytes.unwrap_or(DEFAULT_JSON_LIMIT_BYTES)
    }

    /// Page-size cap for paginated listings.
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE)
    }
}
