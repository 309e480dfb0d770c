//! Owner upgrade requests.
//!
//! Customers ask for the owner role; an admin approves or rejects. Approval
//! hands the promotion to the identity system through
//! [`RolePromotion`](crate::domain::ports::RolePromotion).

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, UpgradeRequestId, UserId};

pub use model::{
    BUSINESS_NAME_MAX, MESSAGE_MAX, NewUpgradeRequest, REASON_MAX, SubmitUpgrade, UpgradeChanges,
    UpgradeDecision, UpgradeRequest, UpgradeStatus,
};
pub use service::UpgradeService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    #[error("upgrade request {0} was not found")]
    NotFound(UpgradeRequestId),
    #[error("user {0} can already manage restaurants")]
    AlreadyOwner(UserId),
    #[error("user {user_id} already has pending upgrade request {existing}")]
    AlreadyPending {
        user_id: UserId,
        existing: UpgradeRequestId,
    },
    #[error("only admins may decide upgrade requests")]
    AdminRequired,
    #[error("upgrade request {id} was already {status}")]
    AlreadyDecided {
        id: UpgradeRequestId,
        status: UpgradeStatus,
    },
    #[error("user {user_id} may not view upgrade request {id}")]
    NotRequester { id: UpgradeRequestId, user_id: UserId },
    #[error("role promotion failed: {0}")]
    Promotion(String),
}

impl From<UpgradeError> for Error {
    fn from(value: UpgradeError) -> Self {
        let message = value.to_string();
        match value {
            UpgradeError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "upgrade_request_not_found", "requestId": id })),
            UpgradeError::AlreadyOwner(user_id) => Error::conflict(message)
                .with_details(json!({ "code": "already_owner", "userId": user_id })),
            UpgradeError::AlreadyPending { user_id, existing } => {
                Error::conflict(message).with_details(json!({
                    "code": "upgrade_already_pending",
                    "userId": user_id,
                    "requestId": existing,
                }))
            }
            UpgradeError::AdminRequired => {
                Error::forbidden(message).with_details(json!({ "code": "admin_required" }))
            }
            UpgradeError::AlreadyDecided { id, status } => {
                Error::conflict(message).with_details(json!({
                    "code": "upgrade_already_decided",
                    "requestId": id,
                    "status": status,
                }))
            }
            UpgradeError::NotRequester { id, user_id } => {
                Error::forbidden(message).with_details(json!({
                    "code": "not_requester",
                    "requestId": id,
                    "userId": user_id,
                }))
            }
            UpgradeError::Promotion(reason) => {
                Error::service_unavailable(message).with_details(json!({
                    "code": "role_promotion_failed",
                    "reason": reason,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests;
