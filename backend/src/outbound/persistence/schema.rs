//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Stored records.
    ///
    /// `email` is indexed but not unique; uniqueness is enforced by the
    /// record service.
    records (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        age -> Int4,
    }
}
