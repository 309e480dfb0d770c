//! Paid plans that owners hold.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, SubscriptionId, UserId};

pub use model::{
    MAX_MONTHS, MIN_MONTHS, NewSubscription, SubscribeRequest, Subscription, SubscriptionChanges,
    SubscriptionPlan, SubscriptionStatus,
};
pub use service::SubscriptionService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    #[error("subscription {0} was not found")]
    NotFound(SubscriptionId),
    #[error("only owners and admins may hold subscriptions")]
    OwnerRoleRequired,
    #[error("owner {owner_id} already holds active subscription {existing}")]
    AlreadySubscribed {
        owner_id: UserId,
        existing: SubscriptionId,
    },
    #[error("subscription {id} is {status} and cannot be cancelled")]
    NotActive {
        id: SubscriptionId,
        status: SubscriptionStatus,
    },
    #[error("user {user_id} does not hold subscription {id}")]
    NotHolder { id: SubscriptionId, user_id: UserId },
    #[error("user {user_id} may not view subscriptions of owner {owner_id}")]
    ForeignOwner { owner_id: UserId, user_id: UserId },
}

impl From<SubscriptionError> for Error {
    fn from(value: SubscriptionError) -> Self {
        let message = value.to_string();
        match value {
            SubscriptionError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "subscription_not_found", "subscriptionId": id })),
            SubscriptionError::OwnerRoleRequired => {
                Error::forbidden(message).with_details(json!({ "code": "owner_role_required" }))
            }
            SubscriptionError::AlreadySubscribed { owner_id, existing } => {
                Error::conflict(message).with_details(json!({
                    "code": "already_subscribed",
                    "ownerId": owner_id,
                    "subscriptionId": existing,
                }))
            }
            SubscriptionError::NotActive { id, status } => {
                Error::conflict(message).with_details(json!({
                    "code": "subscription_not_active",
                    "subscriptionId": id,
                    "status": status,
                }))
            }
            SubscriptionError::NotHolder { id, user_id } => {
                Error::forbidden(message).with_details(json!({
                    "code": "not_subscription_holder",
                    "subscriptionId": id,
                    "userId": user_id,
                }))
            }
            SubscriptionError::ForeignOwner { owner_id, user_id } => {
                Error::forbidden(message).with_details(json!({
                    "code": "foreign_owner",
                    "ownerId": owner_id,
                    "userId": user_id,
                }))
            }
        }
    }
}
