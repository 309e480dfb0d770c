//! Booking rules.
//!
//! A requested slot is checked in a fixed order and the first failing rule
//! decides the error:
//!
//! 1. the slot starts in the future;
//! 2. the table exists and belongs to the restaurant;
//! 3. the table is active;
//! 4. the party fits the table;
//! 5. the slot lies within one day's opening hours;
//! 6. no pending or confirmed reservation on the table overlaps the slot.
//!
//! Rules 1 to 5 only need loaded data and live in [`check_slot`]. Rule 6
//! needs the table's current bookings and lives in [`first_clash`].

use chrono::{DateTime, Utc};

use crate::domain::restaurants::Restaurant;
use crate::domain::tables::DiningTable;
use crate::domain::{ReservationId, TableId};

use super::{Reservation, ReservationError};

/// A table and time window someone wants to book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub table_id: TableId,
    pub party_size: u16,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Apply rules 1 to 5.
///
/// `table` is the result of looking up `slot.table_id`.
pub fn check_slot(
    slot: &Slot,
    now: DateTime<Utc>,
    restaurant: &Restaurant,
    table: Option<&DiningTable>,
) -> Result<(), ReservationError> {
    if slot.starts_at <= now {
        return Err(ReservationError::StartNotInFuture {
            starts_at: slot.starts_at,
        });
    }

    let table = table.ok_or(ReservationError::TableNotFound(slot.table_id))?;
    if table.restaurant_id != restaurant.id {
        return Err(ReservationError::TableNotInRestaurant {
            table_id: table.id,
            restaurant_id: restaurant.id,
        });
    }

    if !table.is_active {
        return Err(ReservationError::TableInactive(table.id));
    }

    if slot.party_size > table.capacity {
        return Err(ReservationError::CapacityExceeded {
            party_size: slot.party_size,
            capacity: table.capacity,
        });
    }

    if !restaurant.hours.contains(slot.starts_at, slot.ends_at) {
        return Err(ReservationError::OutsideOpeningHours {
            opens_at: restaurant.hours.opens_at,
            closes_at: restaurant.hours.closes_at,
        });
    }

    Ok(())
}

/// The first table-holding booking in `existing` that overlaps `slot`, ignoring `exclude`.
pub fn first_clash<'a>(
    slot: &Slot,
    existing: &'a [Reservation],
    exclude: Option<ReservationId>,
) -> Option<&'a Reservation> {
    existing.iter().find(|reservation| {
        Some(reservation.id) != exclude
            && reservation.table_id == slot.table_id
            && reservation.blocks(slot.starts_at, slot.ends_at)
    })
}
