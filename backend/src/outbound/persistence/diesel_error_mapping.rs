//! Diesel and pool error mapping for the record repository.

use tracing::debug;

use crate::domain::ports::RecordRepositoryError;

use super::pool::PoolError;

/// Map pool failures to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RecordRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordRepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures to repository errors, logging the underlying cause.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> RecordRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordRepositoryError::connection("database connection error")
        }
        _ => RecordRepositoryError::query("database error"),
    }
}
