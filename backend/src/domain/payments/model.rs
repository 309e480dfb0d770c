//! Payment records for reservations and subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::text_enum::text_enum;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{Money, PaymentId, ReservationId, SubscriptionId, UserId};

text_enum! {
    /// How the payer settles.
    pub enum PaymentMethod as "payment type" {
        Card => "card",
        Cash => "cash",
        BankTransfer => "bank_transfer",
        Wallet => "wallet",
    }
}

text_enum! {
    pub enum PaymentStatus as "payment status" {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

impl PaymentStatus {
    pub const fn can_become(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed | Self::Failed) | (Self::Completed, Self::Refunded)
        )
    }
}

/// What a payment is for. Exactly one target per payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PaymentTarget {
    Reservation(ReservationId),
    Subscription(SubscriptionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub payer_id: UserId,
    pub target: PaymentTarget,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client payload for recording a payment.
///
/// `method` stays raw text so an unknown method is reported as an invalid
/// payment type rather than a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub reservation_id: Option<ReservationId>,
    #[serde(default)]
    pub subscription_id: Option<SubscriptionId>,
    pub amount: Money,
    pub method: String,
}

impl PaymentRequest {
    /// The single target named by the request.
    pub const fn target(&self) -> Option<PaymentTarget> {
        match (self.reservation_id, self.subscription_id) {
            (Some(id), None) => Some(PaymentTarget::Reservation(id)),
            (None, Some(id)) => Some(PaymentTarget::Subscription(id)),
            _ => None,
        }
    }
}

impl Validate for PaymentRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.target().is_none() {
            errors.push(
                "target",
                "single_target",
                "exactly one of reservationId and subscriptionId is required",
            );
        }
        self.amount.check_positive("amount", &mut errors);
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub payer_id: UserId,
    pub target: PaymentTarget,
    pub amount: Money,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentChanges {
    pub status: Option<PaymentStatus>,
}

impl Validate for PaymentChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        errors.finish()
    }
}

impl Entity for Payment {
    type Id = PaymentId;
    type Draft = NewPayment;
    type Changes = PaymentChanges;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewPayment, now: DateTime<Utc>) -> Self {
        Self {
            id: PaymentId::random(),
            payer_id: draft.payer_id,
            target: draft.target,
            amount: draft.amount,
            method: draft.method,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: PaymentChanges, now: DateTime<Utc>) {
        set_if(&mut self.status, changes.status);
        self.updated_at = now;
    }
}
