//! Generic persistence port shared by every feature.
//!
//! [`Repository`] is the minimal CRUD contract a storage adapter satisfies.
//! Absence is never an error: `find_by_id` and `update` answer `None` and
//! `delete` answers `false` for unknown ids. Only infrastructure failures
//! surface as [`RepositoryError`], and they reach callers unmodified.
//! Paged and filtered queries live on per-feature extension traits.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated, PaginationError};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

use super::define_port_error;
use super::mapper::MappingError;

define_port_error! {
    /// Infrastructure failures raised by repository adapters.
    pub enum RepositoryError {
        /// The datastore could not be reached.
        Connection { message: String } =>
            "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "repository query failed: {message}",
        /// A unique constraint rejected the write.
        UniqueViolation { constraint: String } =>
            "unique constraint violated: {constraint}",
        /// A foreign key constraint rejected the write.
        ForeignKeyViolation { constraint: String } =>
            "foreign key constraint violated: {constraint}",
        /// A check constraint rejected the write.
        CheckViolation { constraint: String } =>
            "check constraint violated: {constraint}",
        /// A stored record could not be mapped back into the domain.
        InvalidRecord { message: String } =>
            "stored record is invalid: {message}",
    }
}

impl From<MappingError> for RepositoryError {
    fn from(error: MappingError) -> Self {
        Self::invalid_record(error.to_string())
    }
}

/// Update input: the target id plus the fields to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<Id, Changes> {
    pub id: Id,
    pub changes: Changes,
}

impl<Id, Changes> Patch<Id, Changes> {
    pub const fn new(id: Id, changes: Changes) -> Self {
        Self { id, changes }
    }
}

/// One page of entities plus the count of all matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> PageSlice<T> {
    /// Package the slice as the envelope for `request`.
    pub fn into_paginated(self, request: &PageRequest) -> Result<Paginated<T>, PaginationError> {
        Paginated::new(self.items, self.total, request)
    }
}

/// Minimal persistence contract for one entity type.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stored entity.
    type Entity: Send;
    /// Identifier used for point lookups.
    type Id: Send + Sync;
    /// Data required to create an entity.
    type CreateInput: Send;
    /// Target plus changes for an update.
    type UpdateInput: Send;

    /// Persist a new entity with generated id and timestamps populated.
    async fn create(&self, data: Self::CreateInput) -> Result<Self::Entity, RepositoryError>;

    /// Apply changes to an existing entity.
    ///
    /// Returns `None` when nothing matched. Never inserts.
    async fn update(&self, data: Self::UpdateInput)
    -> Result<Option<Self::Entity>, RepositoryError>;

    /// Point lookup; `None` when absent.
    async fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>, RepositoryError>;

    /// Every stored entity in creation order.
    async fn find_all(&self) -> Result<Vec<Self::Entity>, RepositoryError>;

    /// Remove an entity, reporting whether a record was actually deleted.
    async fn delete(&self, id: &Self::Id) -> Result<bool, RepositoryError>;
}

/// Adapter turning a repository failure during `operation` into a domain
/// error.
///
/// Connection loss becomes `service_unavailable`; constraint rejections
/// become `conflict` or `invalid_request`; everything else is an operation
/// failure carrying the cause.
///
/// # Examples
/// ```
/// use backend::domain::ErrorCode;
/// use backend::domain::ports::{RepositoryError, repository_failure};
///
/// let map = repository_failure("create section");
/// let err = map(RepositoryError::unique_violation("sections_restaurant_name_key"));
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// ```
pub fn repository_failure(operation: &'static str) -> impl Fn(RepositoryError) -> Error {
    move |error| {
        debug!(%error, operation, "repository call failed");
        match error {
            RepositoryError::Connection { message } => {
                Error::service_unavailable(format!("datastore unavailable while trying to {operation}"))
                    .with_details(json!({ "operation": operation, "reason": message }))
            }
            RepositoryError::UniqueViolation { constraint } => {
                Error::conflict(format!("{operation} conflicts with an existing record"))
                    .with_details(json!({ "constraint": constraint }))
            }
            RepositoryError::ForeignKeyViolation { constraint } => {
                Error::conflict(format!("{operation} references a missing or dependent record"))
                    .with_details(json!({ "constraint": constraint }))
            }
            RepositoryError::CheckViolation { constraint } => {
                Error::invalid_request(format!("{operation} violates a data rule"))
                    .with_details(json!({ "constraint": constraint }))
            }
            other @ (RepositoryError::Query { .. } | RepositoryError::InvalidRecord { .. }) => {
                Error::operation_failed(operation, other)
            }
        }
    }
}
