//! Port for reservation persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::reservations::{NewReservation, Reservation, ReservationChanges};
use crate::domain::{ReservationId, RestaurantId, TableId, UserId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type ReservationPatch = Patch<ReservationId, ReservationChanges>;

/// Reservation storage with the interval queries booking rules need.
///
/// Interval queries treat `[starts_at, ends_at)` as half-open and only
/// consider pending and confirmed reservations.
#[async_trait]
pub trait ReservationRepository:
    Repository<
        Entity = Reservation,
        Id = ReservationId,
        CreateInput = NewReservation,
        UpdateInput = ReservationPatch,
    >
{
    /// Live reservations on `table_id` overlapping the window, except
    /// `exclude`.
    async fn find_overlapping(
        &self,
        table_id: &TableId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>, RepositoryError>;

    /// Live reservations anywhere in a restaurant overlapping the window.
    async fn find_active_in_window(
        &self,
        restaurant_id: &RestaurantId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, RepositoryError>;

    /// Pending and confirmed reservations held on `table_id`, at any time.
    async fn count_live_by_table(&self, table_id: &TableId) -> Result<u64, RepositoryError>;

    /// Reservations of any status made at `restaurant_id`.
    async fn count_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<u64, RepositoryError>;

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError>;

    async fn find_page_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError>;
}
