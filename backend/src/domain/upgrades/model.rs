//! Requests from customers to become restaurant owners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::text_enum::text_enum;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{UpgradeRequestId, UserId};

pub const BUSINESS_NAME_MAX: usize = 120;
pub const MESSAGE_MAX: usize = 2000;
pub const REASON_MAX: usize = 500;

text_enum! {
    pub enum UpgradeStatus as "upgrade status" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequest {
    pub id: UpgradeRequestId,
    pub user_id: UserId,
    pub business_name: String,
    pub message: Option<String>,
    pub status: UpgradeStatus,
    pub decided_by: Option<UserId>,
    pub decided_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUpgrade {
    pub business_name: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for SubmitUpgrade {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.text("businessName", &self.business_name, BUSINESS_NAME_MAX);
        errors.optional_text("message", self.message.as_deref(), MESSAGE_MAX);
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUpgradeRequest {
    pub user_id: UserId,
    pub business_name: String,
    pub message: Option<String>,
}

/// An admin's verdict on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeDecision {
    pub status: UpgradeStatus,
    pub decided_by: UserId,
    pub decided_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeChanges {
    pub business_name: Option<String>,
    pub message: Option<Option<String>>,
    pub decision: Option<UpgradeDecision>,
}

impl Validate for UpgradeChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(name) = &self.business_name {
            errors.text("businessName", name, BUSINESS_NAME_MAX);
        }
        if let Some(message) = &self.message {
            errors.optional_text("message", message.as_deref(), MESSAGE_MAX);
        }
        if let Some(decision) = &self.decision {
            errors.optional_text("reason", decision.rejection_reason.as_deref(), REASON_MAX);
        }
        errors.finish()
    }
}

impl Entity for UpgradeRequest {
    type Id = UpgradeRequestId;
    type Draft = NewUpgradeRequest;
    type Changes = UpgradeChanges;

    fn id(&self) -> UpgradeRequestId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewUpgradeRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: UpgradeRequestId::random(),
            user_id: draft.user_id,
            business_name: draft.business_name.trim().to_owned(),
            message: draft.message,
            status: UpgradeStatus::Pending,
            decided_by: None,
            decided_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: UpgradeChanges, now: DateTime<Utc>) {
        set_if(
            &mut self.business_name,
            changes.business_name.map(|name| name.trim().to_owned()),
        );
        set_if(&mut self.message, changes.message);
        if let Some(decision) = changes.decision {
            self.status = decision.status;
            self.decided_by = Some(decision.decided_by);
            self.decided_at = Some(decision.decided_at);
            self.rejection_reason = decision.rejection_reason;
        }
        self.updated_at = now;
    }
}
