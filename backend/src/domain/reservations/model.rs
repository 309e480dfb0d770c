//! Table bookings and their lifecycle.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::text_enum::text_enum;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{ReservationId, RestaurantId, TableId, UserId};

pub const MIN_PARTY_SIZE: u16 = 1;
pub const MAX_PARTY_SIZE: u16 = 50;
pub const MAX_DURATION_HOURS: i64 = 8;
pub const NOTES_MAX: usize = 500;

text_enum! {
    /// Lifecycle state of a reservation.
    pub enum ReservationStatus as "reservation status" {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Completed => "completed",
    }
}

impl ReservationStatus {
    /// Whether a reservation in this state occupies its table.
    pub const fn holds_table(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// ```
    /// use backend::domain::reservations::ReservationStatus;
    ///
    /// assert!(ReservationStatus::Pending.can_become(ReservationStatus::Confirmed));
    /// assert!(!ReservationStatus::Cancelled.can_become(ReservationStatus::Confirmed));
    /// ```
    pub const fn can_become(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

/// Whether the half-open intervals `[a_start, a_end)` and `[b_start, b_end)`
/// share any instant. Touching intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub restaurant_id: RestaurantId,
    pub table_id: TableId,
    pub customer_id: UserId,
    pub party_size: u16,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation blocks its table during `[starts_at, ends_at)`.
    pub fn blocks(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        self.status.holds_table() && overlaps(self.starts_at, self.ends_at, starts_at, ends_at)
    }
}

/// Reject empty, inverted, or overlong booking windows.
pub(crate) fn check_window(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    errors: &mut ValidationErrors,
) {
    if ends_at <= starts_at {
        errors.push("endsAt", "invalid_interval", "endsAt must be later than startsAt");
    } else if ends_at - starts_at > TimeDelta::hours(MAX_DURATION_HOURS) {
        errors.push(
            "endsAt",
            "too_long",
            format!("a reservation may last at most {MAX_DURATION_HOURS} hours"),
        );
    }
}

/// Client payload for booking a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub restaurant_id: RestaurantId,
    pub table_id: TableId,
    pub party_size: u16,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.range("partySize", self.party_size, MIN_PARTY_SIZE, MAX_PARTY_SIZE);
        check_window(self.starts_at, self.ends_at, &mut errors);
        errors.optional_text("notes", self.notes.as_deref(), NOTES_MAX);
        errors.finish()
    }
}

/// Client payload for moving a reservation. The window is always restated;
/// an omitted table or party size keeps its current value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    #[serde(default)]
    pub table_id: Option<TableId>,
    #[serde(default)]
    pub party_size: Option<u16>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Validate for RescheduleRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(party_size) = self.party_size {
            errors.range("partySize", party_size, MIN_PARTY_SIZE, MAX_PARTY_SIZE);
        }
        check_window(self.starts_at, self.ends_at, &mut errors);
        errors.finish()
    }
}

/// Repository input for a new reservation. Reservations start pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub restaurant_id: RestaurantId,
    pub table_id: TableId,
    pub customer_id: UserId,
    pub party_size: u16,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewReservation {
    pub fn from_request(request: BookingRequest, customer_id: UserId) -> Self {
        Self {
            restaurant_id: request.restaurant_id,
            table_id: request.table_id,
            customer_id,
            party_size: request.party_size,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationChanges {
    pub table_id: Option<TableId>,
    pub party_size: Option<u16>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: Option<ReservationStatus>,
    pub notes: Option<Option<String>>,
}

impl ReservationChanges {
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Validate for ReservationChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(party_size) = self.party_size {
            errors.range("partySize", party_size, MIN_PARTY_SIZE, MAX_PARTY_SIZE);
        }
        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            check_window(starts_at, ends_at, &mut errors);
        }
        if let Some(notes) = &self.notes {
            errors.optional_text("notes", notes.as_deref(), NOTES_MAX);
        }
        errors.finish()
    }
}

impl Entity for Reservation {
    type Id = ReservationId;
    type Draft = NewReservation;
    type Changes = ReservationChanges;

    fn id(&self) -> ReservationId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewReservation, now: DateTime<Utc>) -> Self {
        Self {
            id: ReservationId::random(),
            restaurant_id: draft.restaurant_id,
            table_id: draft.table_id,
            customer_id: draft.customer_id,
            party_size: draft.party_size,
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            status: ReservationStatus::Pending,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ReservationChanges, now: DateTime<Utc>) {
        set_if(&mut self.table_id, changes.table_id);
        set_if(&mut self.party_size, changes.party_size);
        set_if(&mut self.starts_at, changes.starts_at);
        set_if(&mut self.ends_at, changes.ends_at);
        set_if(&mut self.status, changes.status);
        set_if(&mut self.notes, changes.notes);
        self.updated_at = now;
    }
}
