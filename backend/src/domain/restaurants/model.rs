//! Restaurant aggregate and its inputs.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{RestaurantId, UserId};

pub const NAME_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 2000;
pub const ADDRESS_MAX: usize = 250;
pub const PHONE_MAX: usize = 32;

/// Daily opening window in UTC. Overnight windows are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

impl OpeningHours {
    pub const fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Self {
        Self {
            opens_at,
            closes_at,
        }
    }

    fn check(&self, errors: &mut ValidationErrors) {
        if self.opens_at >= self.closes_at {
            errors.push(
                "closesAt",
                "invalid_hours",
                "closing time must be later than opening time",
            );
        }
    }

    /// Whether `[starts_at, ends_at)` lies within one day's opening window.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::restaurants::OpeningHours;
    /// use chrono::{NaiveTime, TimeZone, Utc};
    ///
    /// let hours = OpeningHours::new(
    ///     NaiveTime::from_hms_opt(11, 0, 0).expect("time"),
    ///     NaiveTime::from_hms_opt(22, 0, 0).expect("time"),
    /// );
    /// let start = Utc.with_ymd_and_hms(2030, 5, 4, 20, 0, 0).single().expect("start");
    /// let end = Utc.with_ymd_and_hms(2030, 5, 4, 22, 0, 0).single().expect("end");
    /// assert!(hours.contains(start, end));
    /// ```
    pub fn contains(&self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        starts_at.date_naive() == ends_at.date_naive()
            && starts_at.time() >= self.opens_at
            && ends_at.time() <= self.closes_at
    }
}

/// A restaurant managed by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: Option<String>,
    pub hours: OpeningHours,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for creating a restaurant.
///
/// `owner_id` may only be set by admins; otherwise the caller owns the
/// restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurant {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub hours: OpeningHours,
    #[serde(default)]
    pub owner_id: Option<UserId>,
}

impl Validate for CreateRestaurant {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.text("name", &self.name, NAME_MAX);
        errors.optional_text("description", self.description.as_deref(), DESCRIPTION_MAX);
        errors.text("address", &self.address, ADDRESS_MAX);
        errors.optional_text("phone", self.phone.as_deref(), PHONE_MAX);
        self.hours.check(&mut errors);
        errors.finish()
    }
}

/// Repository input for a new restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub owner_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: Option<String>,
    pub hours: OpeningHours,
}

impl NewRestaurant {
    pub fn from_request(request: CreateRestaurant, owner_id: UserId) -> Self {
        Self {
            owner_id,
            name: request.name.trim().to_owned(),
            description: request.description,
            address: request.address.trim().to_owned(),
            phone: request.phone,
            hours: request.hours,
        }
    }
}

/// Partial restaurant update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub address: Option<String>,
    pub phone: Option<Option<String>>,
    pub hours: Option<OpeningHours>,
}

impl Validate for RestaurantChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(name) = &self.name {
            errors.text("name", name, NAME_MAX);
        }
        if let Some(description) = &self.description {
            errors.optional_text("description", description.as_deref(), DESCRIPTION_MAX);
        }
        if let Some(address) = &self.address {
            errors.text("address", address, ADDRESS_MAX);
        }
        if let Some(phone) = &self.phone {
            errors.optional_text("phone", phone.as_deref(), PHONE_MAX);
        }
        if let Some(hours) = &self.hours {
            hours.check(&mut errors);
        }
        errors.finish()
    }
}

impl Entity for Restaurant {
    type Id = RestaurantId;
    type Draft = NewRestaurant;
    type Changes = RestaurantChanges;

    fn id(&self) -> RestaurantId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewRestaurant, now: DateTime<Utc>) -> Self {
        Self {
            id: RestaurantId::random(),
            owner_id: draft.owner_id,
            name: draft.name,
            description: draft.description,
            address: draft.address,
            phone: draft.phone,
            hours: draft.hours,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: RestaurantChanges, now: DateTime<Utc>) {
        set_if(&mut self.name, changes.name);
        set_if(&mut self.description, changes.description);
        set_if(&mut self.address, changes.address);
        set_if(&mut self.phone, changes.phone);
        set_if(&mut self.hours, changes.hours);
        self.updated_at = now;
    }
}
