//! Shared helpers for the Diesel repositories.
//!
//! Every adapter funnels pool and Diesel failures through this module so that
//! constraint names, connection loss and query failures reach the domain as
//! the same [`RepositoryError`] variants regardless of the table involved.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{MappingError, RepositoryError};

use super::pool::PoolError;

diesel::define_sql_function! {
    /// SQL `lower()`, used for case-insensitive name lookups.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

fn constraint_of(info: &dyn diesel::result::DatabaseErrorInformation) -> String {
    info.constraint_name()
        .map_or_else(|| info.message().to_owned(), str::to_owned)
}

/// Map a Diesel error raised while running `operation`.
pub(crate) fn map_diesel_error(error: DieselError, operation: &str) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            operation,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                RepositoryError::unique_violation(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                RepositoryError::foreign_key_violation(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::CheckViolation => {
                RepositoryError::check_violation(constraint_of(info.as_ref()))
            }
            DatabaseErrorKind::ClosedConnection => {
                RepositoryError::connection("database connection closed")
            }
            _ => RepositoryError::query(format!("{operation}: {}", info.message())),
        },
        other => RepositoryError::query(format!("{operation}: {other}")),
    }
}

/// Failure inside a transaction: either the database or a stored row.
#[derive(Debug)]
pub(crate) enum StoreFailure {
    Diesel(DieselError),
    Mapping(MappingError),
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<MappingError> for StoreFailure {
    fn from(error: MappingError) -> Self {
        Self::Mapping(error)
    }
}

impl StoreFailure {
    pub(crate) fn into_repository(self, operation: &str) -> RepositoryError {
        match self {
            Self::Diesel(error) => map_diesel_error(error, operation),
            Self::Mapping(error) => error.into(),
        }
    }
}

/// `LIMIT` and `OFFSET` for a page request.
pub(crate) fn page_window(page: &PageRequest) -> (i64, i64) {
    let limit = i64::from(page.limit());
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

/// `COUNT(*)` results are never negative.
pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
