//! Lifecycle hooks shared by every persisted aggregate.
//!
//! Adapters stay generic by asking the entity to build itself from its
//! creation input and to fold an update into its current state, so identifier
//! generation and timestamp handling live in one place per entity.

use chrono::{DateTime, Utc};

/// A persisted aggregate with generated id and timestamps.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: Copy + Eq + Send + Sync + std::fmt::Debug + 'static;
    /// Creation input.
    type Draft: Send + 'static;
    /// Partial update input; `None` fields are left untouched.
    type Changes: Send + 'static;

    fn id(&self) -> Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    /// Materialise a new entity with a fresh id, stamped with `now`.
    fn from_draft(draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Fold `changes` into the entity and bump `updated_at` to `now`.
    fn apply(&mut self, changes: Self::Changes, now: DateTime<Utc>);
}

/// Overwrite `target` when `change` carries a value.
pub(crate) fn set_if<T>(target: &mut T, change: Option<T>) {
    if let Some(value) = change {
        *target = value;
    }
}
