//! Table reservations.

pub mod availability;
mod error;
mod model;
mod service;

pub use error::ReservationError;
pub use model::{
    BookingRequest, MAX_DURATION_HOURS, MAX_PARTY_SIZE, MIN_PARTY_SIZE, NOTES_MAX, NewReservation,
    RescheduleRequest, Reservation, ReservationChanges, ReservationStatus, overlaps,
};
pub use service::ReservationService;

#[cfg(test)]
mod tests;
