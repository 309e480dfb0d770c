//! Owner subscription plans.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::text_enum::text_enum;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{SubscriptionId, UserId};

pub const MIN_MONTHS: u8 = 1;
pub const MAX_MONTHS: u8 = 24;

text_enum! {
    pub enum SubscriptionPlan as "subscription plan" {
        Basic => "basic",
        Premium => "premium",
        Enterprise => "enterprise",
    }
}

text_enum! {
    pub enum SubscriptionStatus as "subscription status" {
        Active => "active",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub owner_id: UserId,
    pub plan: SubscriptionPlan,
    pub months: u8,
    pub status: SubscriptionStatus,
    pub starts_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Active and not yet past its expiry at `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && now < self.expires_at
    }

    /// Still marked active although its term ran out before `now`.
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub plan: SubscriptionPlan,
    pub months: u8,
}

impl Validate for SubscribeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.range("months", self.months, MIN_MONTHS, MAX_MONTHS);
        errors.finish()
    }
}

/// Repository input; the term runs `months` calendar months from
/// `starts_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub owner_id: UserId,
    pub plan: SubscriptionPlan,
    pub months: u8,
    pub starts_at: DateTime<Utc>,
}

impl NewSubscription {
    /// Instant the term ends, or `None` past the supported calendar.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
            .checked_add_months(Months::new(u32::from(self.months)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionChanges {
    pub status: Option<SubscriptionStatus>,
    pub cancelled_at: Option<Option<DateTime<Utc>>>,
}

impl Validate for SubscriptionChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        errors.finish()
    }
}

impl Entity for Subscription {
    type Id = SubscriptionId;
    type Draft = NewSubscription;
    type Changes = SubscriptionChanges;

    fn id(&self) -> SubscriptionId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewSubscription, now: DateTime<Utc>) -> Self {
        let expires_at = draft.expires_at().unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            id: SubscriptionId::random(),
            owner_id: draft.owner_id,
            plan: draft.plan,
            months: draft.months,
            status: SubscriptionStatus::Active,
            starts_at: draft.starts_at,
            expires_at,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: SubscriptionChanges, now: DateTime<Utc>) {
        set_if(&mut self.status, changes.status);
        set_if(&mut self.cancelled_at, changes.cancelled_at);
        self.updated_at = now;
    }
}
