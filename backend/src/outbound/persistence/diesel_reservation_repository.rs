//! PostgreSQL-backed `ReservationRepository` implementation.
//!
//! Interval queries compare `starts_at < ends && ends_at > starts`, which is
//! the half-open overlap test, and only consider statuses that hold a table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{
    OrmMapper, PageSlice, RepositoryError, ReservationPatch, ReservationRepository,
};
use crate::domain::reservations::{NewReservation, Reservation, ReservationStatus};
use crate::domain::{ReservationId, RestaurantId, TableId, UserId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::ReservationMapper;
use super::models::ReservationRow;
use super::schema::reservations;

diesel_repository! {
    /// Diesel-backed implementation of the `ReservationRepository` port.
    DieselReservationRepository {
        entity: Reservation,
        id: ReservationId,
        create: NewReservation,
        update: ReservationPatch,
        row: ReservationRow,
        mapper: ReservationMapper,
        table: reservations,
        label: "reservation",
    }
}

fn holding_statuses() -> Vec<&'static str> {
    ReservationStatus::ALL
        .iter()
        .filter(|status| status.holds_table())
        .map(ReservationStatus::as_str)
        .collect()
}

#[async_trait]
impl ReservationRepository for DieselReservationRepository {
    async fn find_overlapping(
        &self,
        table_id: &TableId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = reservations::table
            .filter(reservations::table_id.eq(*table_id.as_uuid()))
            .filter(reservations::status.eq_any(holding_statuses()))
            .filter(reservations::starts_at.lt(ends_at))
            .filter(reservations::ends_at.gt(starts_at))
            .into_boxed();
        if let Some(excluded) = exclude {
            query = query.filter(reservations::id.ne(*excluded.as_uuid()));
        }
        let rows: Vec<ReservationRow> = query
            .order(reservations::starts_at.asc())
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find overlapping reservations"))?;
        Ok(ReservationMapper.to_domain_list(rows)?)
    }

    async fn find_active_in_window(
        &self,
        restaurant_id: &RestaurantId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReservationRow> = reservations::table
            .filter(reservations::restaurant_id.eq(*restaurant_id.as_uuid()))
            .filter(reservations::status.eq_any(holding_statuses()))
            .filter(reservations::starts_at.lt(ends_at))
            .filter(reservations::ends_at.gt(starts_at))
            .order(reservations::starts_at.asc())
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find reservations in window"))?;
        Ok(ReservationMapper.to_domain_list(rows)?)
    }

    async fn count_live_by_table(&self, table_id: &TableId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = reservations::table
            .filter(reservations::table_id.eq(*table_id.as_uuid()))
            .filter(reservations::status.eq_any(holding_statuses()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count live table reservations"))?;
        Ok(count_to_u64(total))
    }

    async fn count_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = reservations::table
            .filter(reservations::restaurant_id.eq(*restaurant_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count restaurant reservations"))?;
        Ok(count_to_u64(total))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();
        let total: i64 = reservations::table
            .filter(reservations::restaurant_id.eq(restaurant))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count restaurant reservations"))?;
        let rows: Vec<ReservationRow> = reservations::table
            .filter(reservations::restaurant_id.eq(restaurant))
            .order((reservations::created_at.asc(), reservations::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list restaurant reservations"))?;
        Ok(PageSlice {
            items: ReservationMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }

    async fn find_page_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let customer = *customer_id.as_uuid();
        let total: i64 = reservations::table
            .filter(reservations::customer_id.eq(customer))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count customer reservations"))?;
        let rows: Vec<ReservationRow> = reservations::table
            .filter(reservations::customer_id.eq(customer))
            .order((reservations::created_at.asc(), reservations::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(ReservationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list customer reservations"))?;
        Ok(PageSlice {
            items: ReservationMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn only_pending_and_confirmed_hold_a_table() {
        assert_eq!(holding_statuses(), vec!["pending", "confirmed"]);
    }
}
