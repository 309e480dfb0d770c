//! Reservation use cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{
    Patch, ReservationRepository, RestaurantRepository, TableRepository, repository_failure,
};
use crate::domain::restaurants::Restaurant;
use crate::domain::restaurants::access::{ensure_manages, load_managed_restaurant, load_restaurant};
use crate::domain::tables::DiningTable;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{Actor, Error, ReservationId, RestaurantId, UserId};

use super::availability::{Slot, check_slot, first_clash};
use super::model::check_window;
use super::{
    BookingRequest, NewReservation, RescheduleRequest, Reservation, ReservationChanges,
    ReservationError, ReservationStatus,
};

/// Books tables and walks reservations through their lifecycle.
pub struct ReservationService<R, T, V> {
    restaurants: Arc<R>,
    tables: Arc<T>,
    reservations: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<R, T, V> Clone for ReservationService<R, T, V> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            tables: Arc::clone(&self.tables),
            reservations: Arc::clone(&self.reservations),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, T, V> ReservationService<R, T, V>
where
    R: RestaurantRepository,
    T: TableRepository,
    V: ReservationRepository,
{
    pub fn new(
        restaurants: Arc<R>,
        tables: Arc<T>,
        reservations: Arc<V>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            restaurants,
            tables,
            reservations,
            clock,
        }
    }

    /// Book a table for the calling customer.
    pub async fn create(&self, actor: &Actor, request: BookingRequest) -> Result<Reservation, Error> {
        request.validate()?;
        let restaurant = load_restaurant(self.restaurants.as_ref(), request.restaurant_id).await?;
        let slot = Slot {
            table_id: request.table_id,
            party_size: request.party_size,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
        };
        self.ensure_bookable(&restaurant, &slot, None).await?;

        let reservation = self
            .reservations
            .create(NewReservation::from_request(request, actor.user_id))
            .await
            .map_err(repository_failure("create reservation"))?;
        info!(
            reservation_id = %reservation.id,
            table_id = %reservation.table_id,
            starts_at = %reservation.starts_at,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Visible to the customer, the restaurant's owner, and admins.
    pub async fn get(&self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error> {
        let reservation = self.load(id).await?;
        self.ensure_participant(actor, &reservation).await?;
        Ok(reservation)
    }

    pub async fn list_for_restaurant(
        &self,
        actor: &Actor,
        restaurant_id: RestaurantId,
        page: &PageRequest,
    ) -> Result<Paginated<Reservation>, Error> {
        load_managed_restaurant(self.restaurants.as_ref(), actor, restaurant_id).await?;
        let slice = self
            .reservations
            .find_page_by_restaurant(&restaurant_id, page)
            .await
            .map_err(repository_failure("list restaurant reservations"))?;
        Ok(slice.into_paginated(page)?)
    }

    pub async fn list_for_customer(
        &self,
        actor: &Actor,
        customer_id: UserId,
        page: &PageRequest,
    ) -> Result<Paginated<Reservation>, Error> {
        if !actor.acts_for(customer_id) {
            return Err(ReservationError::ForeignCustomer {
                user_id: actor.user_id,
            }
            .into());
        }
        let slice = self
            .reservations
            .find_page_by_customer(&customer_id, page)
            .await
            .map_err(repository_failure("list customer reservations"))?;
        Ok(slice.into_paginated(page)?)
    }

    pub async fn confirm(&self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error> {
        let reservation = self.load(id).await?;
        self.ensure_manager(actor, &reservation).await?;
        self.transition(reservation, ReservationStatus::Confirmed).await
    }

    /// Cancel on behalf of the customer or the restaurant.
    pub async fn cancel(&self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error> {
        let reservation = self.load(id).await?;
        self.ensure_participant(actor, &reservation).await?;
        self.transition(reservation, ReservationStatus::Cancelled).await
    }

    pub async fn complete(&self, actor: &Actor, id: ReservationId) -> Result<Reservation, Error> {
        let reservation = self.load(id).await?;
        self.ensure_manager(actor, &reservation).await?;
        self.transition(reservation, ReservationStatus::Completed).await
    }

    /// Move a live reservation to a new window and optionally another table.
    ///
    /// Every booking rule is re-checked; the reservation never clashes with
    /// itself.
    pub async fn reschedule(
        &self,
        actor: &Actor,
        id: ReservationId,
        request: RescheduleRequest,
    ) -> Result<Reservation, Error> {
        request.validate()?;
        let reservation = self.load(id).await?;
        self.ensure_participant(actor, &reservation).await?;
        if !reservation.status.holds_table() {
            return Err(ReservationError::NotReschedulable {
                id,
                status: reservation.status,
            }
            .into());
        }

        let restaurant = load_restaurant(self.restaurants.as_ref(), reservation.restaurant_id).await?;
        let slot = Slot {
            table_id: request.table_id.unwrap_or(reservation.table_id),
            party_size: request.party_size.unwrap_or(reservation.party_size),
            starts_at: request.starts_at,
            ends_at: request.ends_at,
        };
        self.ensure_bookable(&restaurant, &slot, Some(id)).await?;

        let changes = ReservationChanges {
            table_id: Some(slot.table_id),
            party_size: Some(slot.party_size),
            starts_at: Some(slot.starts_at),
            ends_at: Some(slot.ends_at),
            ..ReservationChanges::default()
        };
        let updated = self
            .reservations
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("reschedule reservation"))?
            .ok_or(ReservationError::NotFound(id))?;
        info!(reservation_id = %id, starts_at = %updated.starts_at, "reservation rescheduled");
        Ok(updated)
    }

    /// Active tables seating `party_size` with nothing booked in the window,
    /// smallest first.
    pub async fn available_tables(
        &self,
        restaurant_id: RestaurantId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        party_size: u16,
    ) -> Result<Vec<DiningTable>, Error> {
        let mut errors = ValidationErrors::new();
        errors.range(
            "partySize",
            party_size,
            super::MIN_PARTY_SIZE,
            super::MAX_PARTY_SIZE,
        );
        check_window(starts_at, ends_at, &mut errors);
        errors.finish()?;

        let restaurant = load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let tables = self
            .tables
            .find_by_restaurant(&restaurant_id)
            .await
            .map_err(repository_failure("list tables"))?;
        let booked = self
            .reservations
            .find_active_in_window(&restaurant_id, starts_at, ends_at)
            .await
            .map_err(repository_failure("list reservations in window"))?;

        let now = self.clock.utc();
        let mut free: Vec<DiningTable> = tables
            .into_iter()
            .filter(|table| {
                let slot = Slot {
                    table_id: table.id,
                    party_size,
                    starts_at,
                    ends_at,
                };
                check_slot(&slot, now, &restaurant, Some(table)).is_ok()
                    && first_clash(&slot, &booked, None).is_none()
            })
            .collect();
        free.sort_by(|a, b| a.capacity.cmp(&b.capacity).then_with(|| a.label.cmp(&b.label)));
        Ok(free)
    }

    async fn ensure_bookable(
        &self,
        restaurant: &Restaurant,
        slot: &Slot,
        exclude: Option<ReservationId>,
    ) -> Result<(), Error> {
        let table = self
            .tables
            .find_by_id(&slot.table_id)
            .await
            .map_err(repository_failure("load table"))?;
        if let Err(error) = check_slot(slot, self.clock.utc(), restaurant, table.as_ref()) {
            debug!(%error, table_id = %slot.table_id, "booking rejected");
            return Err(error.into());
        }

        let existing = self
            .reservations
            .find_overlapping(&slot.table_id, slot.starts_at, slot.ends_at, exclude)
            .await
            .map_err(repository_failure("check table availability"))?;
        if let Some(clash) = first_clash(slot, &existing, exclude) {
            debug!(table_id = %slot.table_id, clashing = %clash.id, "booking overlaps");
            return Err(ReservationError::SlotTaken {
                table_id: slot.table_id,
                clashing: clash.id,
            }
            .into());
        }
        Ok(())
    }

    async fn transition(
        &self,
        reservation: Reservation,
        next: ReservationStatus,
    ) -> Result<Reservation, Error> {
        let id = reservation.id;
        if !reservation.status.can_become(next) {
            return Err(ReservationError::InvalidTransition {
                id,
                from: reservation.status,
                to: next,
            }
            .into());
        }
        let updated = self
            .reservations
            .update(Patch::new(id, ReservationChanges::status(next)))
            .await
            .map_err(repository_failure("update reservation status"))?
            .ok_or(ReservationError::NotFound(id))?;
        info!(reservation_id = %id, from = %reservation.status, to = %next, "reservation status changed");
        Ok(updated)
    }

    async fn load(&self, id: ReservationId) -> Result<Reservation, Error> {
        self.reservations
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load reservation"))?
            .ok_or_else(|| ReservationError::NotFound(id).into())
    }

    async fn ensure_manager(&self, actor: &Actor, reservation: &Reservation) -> Result<(), Error> {
        load_managed_restaurant(self.restaurants.as_ref(), actor, reservation.restaurant_id)
            .await
            .map(drop)
    }

    async fn ensure_participant(
        &self,
        actor: &Actor,
        reservation: &Reservation,
    ) -> Result<(), Error> {
        if actor.acts_for(reservation.customer_id) {
            return Ok(());
        }
        let restaurant = load_restaurant(self.restaurants.as_ref(), reservation.restaurant_id).await?;
        ensure_manages(actor, &restaurant).map_err(|_| {
            ReservationError::NotParticipant {
                id: reservation.id,
                user_id: actor.user_id,
            }
            .into()
        })
    }
}
