//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the [`DieselRecordRepository`] implementation of the record
//! repository port, backed by `diesel-async` with `bb8` connection pooling.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   internal; only domain types cross the port.
//! - Database failures are mapped to
//!   [`RecordRepositoryError`](crate::domain::ports::RecordRepositoryError)
//!   and logged at `debug`.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselRecordRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/records")).await?;
//! let repo = DieselRecordRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_record_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_record_repository::DieselRecordRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
