//! Reservation failures surfaced to callers.

use chrono::{DateTime, NaiveTime, Utc};
use serde_json::json;

use crate::domain::{Error, ReservationId, RestaurantId, TableId, UserId};

use super::ReservationStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("reservation {0} was not found")]
    NotFound(ReservationId),
    #[error("reservations must start in the future, got {starts_at}")]
    StartNotInFuture { starts_at: DateTime<Utc> },
    #[error("table {0} was not found")]
    TableNotFound(TableId),
    #[error("table {table_id} does not belong to restaurant {restaurant_id}")]
    TableNotInRestaurant {
        table_id: TableId,
        restaurant_id: RestaurantId,
    },
    #[error("table {0} is not taking reservations")]
    TableInactive(TableId),
    #[error("a party of {party_size} does not fit a table for {capacity}")]
    CapacityExceeded { party_size: u16, capacity: u16 },
    #[error("reservations must fall between {opens_at} and {closes_at} UTC on a single day")]
    OutsideOpeningHours {
        opens_at: NaiveTime,
        closes_at: NaiveTime,
    },
    #[error("table {table_id} is already booked by reservation {clashing}")]
    SlotTaken {
        table_id: TableId,
        clashing: ReservationId,
    },
    #[error("reservation {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    },
    #[error("reservation {id} is {status} and can no longer be rescheduled")]
    NotReschedulable {
        id: ReservationId,
        status: ReservationStatus,
    },
    #[error("user {user_id} is not a party to reservation {id}")]
    NotParticipant { id: ReservationId, user_id: UserId },
    #[error("user {user_id} may not view reservations of another customer")]
    ForeignCustomer { user_id: UserId },
}

impl From<ReservationError> for Error {
    fn from(value: ReservationError) -> Self {
        let message = value.to_string();
        match value {
            ReservationError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "reservation_not_found", "reservationId": id })),
            ReservationError::StartNotInFuture { starts_at } => Error::invalid_request(message)
                .with_details(json!({ "code": "start_not_in_future", "startsAt": starts_at })),
            ReservationError::TableNotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "table_not_found", "tableId": id })),
            ReservationError::TableNotInRestaurant {
                table_id,
                restaurant_id,
            } => Error::invalid_request(message).with_details(json!({
                "code": "table_not_in_restaurant",
                "tableId": table_id,
                "restaurantId": restaurant_id,
            })),
            ReservationError::TableInactive(id) => Error::conflict(message)
                .with_details(json!({ "code": "table_inactive", "tableId": id })),
            ReservationError::CapacityExceeded {
                party_size,
                capacity,
            } => Error::invalid_request(message).with_details(json!({
                "code": "capacity_exceeded",
                "partySize": party_size,
                "capacity": capacity,
            })),
            ReservationError::OutsideOpeningHours {
                opens_at,
                closes_at,
            } => Error::invalid_request(message).with_details(json!({
                "code": "outside_opening_hours",
                "opensAt": opens_at,
                "closesAt": closes_at,
            })),
            ReservationError::SlotTaken { table_id, clashing } => {
                Error::conflict(message).with_details(json!({
                    "code": "slot_taken",
                    "tableId": table_id,
                    "reservationId": clashing,
                }))
            }
            ReservationError::InvalidTransition { id, from, to } => {
                Error::conflict(message).with_details(json!({
                    "code": "invalid_status_transition",
                    "reservationId": id,
                    "from": from,
                    "to": to,
                }))
            }
            ReservationError::NotReschedulable { id, status } => {
                Error::conflict(message).with_details(json!({
                    "code": "not_reschedulable",
                    "reservationId": id,
                    "status": status,
                }))
            }
            ReservationError::NotParticipant { id, user_id } => {
                Error::forbidden(message).with_details(json!({
                    "code": "not_reservation_participant",
                    "reservationId": id,
                    "userId": user_id,
                }))
            }
            ReservationError::ForeignCustomer { user_id } => Error::forbidden(message)
                .with_details(json!({ "code": "foreign_customer", "userId": user_id })),
        }
    }
}
