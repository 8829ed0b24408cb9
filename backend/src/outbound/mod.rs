//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed record repository using Diesel ORM
//! - **memory**: in-process record repository for database-less runs and tests
//! - **spreadsheet**: calamine-backed decoder for `.xlsx` uploads
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod spreadsheet;
