//! Payments against reservations and subscriptions.
//!
//! Only the record is kept here; settlement happens with an external
//! provider.

mod model;
mod service;

use serde_json::json;

use crate::domain::text_enum::UnknownVariant;
use crate::domain::{Error, PaymentId, UserId};

pub use model::{
    NewPayment, Payment, PaymentChanges, PaymentMethod, PaymentRequest, PaymentStatus,
    PaymentTarget,
};
pub use service::PaymentService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment {0} was not found")]
    NotFound(PaymentId),
    #[error(transparent)]
    InvalidMethod(#[from] UnknownVariant),
    #[error("user {user_id} is not the customer of the paid reservation")]
    NotReservationCustomer { user_id: UserId },
    #[error("user {user_id} does not hold the paid subscription")]
    NotSubscriptionHolder { user_id: UserId },
    #[error("user {user_id} may not view payment {id}")]
    NotPayer { id: PaymentId, user_id: UserId },
    #[error("user {user_id} may not view payments of another payer")]
    ForeignPayer { user_id: UserId },
    #[error("only admins may settle payments")]
    AdminRequired,
    #[error("payment {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: PaymentId,
        from: PaymentStatus,
        to: PaymentStatus,
    },
}

impl From<PaymentError> for Error {
    fn from(value: PaymentError) -> Self {
        let message = value.to_string();
        match value {
            PaymentError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "payment_not_found", "paymentId": id })),
            PaymentError::InvalidMethod(UnknownVariant { input, .. }) => {
                Error::invalid_request(message).with_details(json!({
                    "code": "invalid_payment_type",
                    "method": input,
                    "allowed": PaymentMethod::ALL,
                }))
            }
            PaymentError::NotReservationCustomer { user_id } => Error::forbidden(message)
                .with_details(json!({ "code": "not_reservation_customer", "userId": user_id })),
            PaymentError::NotSubscriptionHolder { user_id } => Error::forbidden(message)
                .with_details(json!({ "code": "not_subscription_holder", "userId": user_id })),
            PaymentError::NotPayer { id, user_id } => Error::forbidden(message).with_details(json!({
                "code": "not_payer",
                "paymentId": id,
                "userId": user_id,
            })),
            PaymentError::ForeignPayer { user_id } => Error::forbidden(message)
                .with_details(json!({ "code": "foreign_payer", "userId": user_id })),
            PaymentError::AdminRequired => {
                Error::forbidden(message).with_details(json!({ "code": "admin_required" }))
            }
            PaymentError::InvalidTransition { id, from, to } => {
                Error::conflict(message).with_details(json!({
                    "code": "invalid_status_transition",
                    "paymentId": id,
                    "from": from,
                    "to": to,
                }))
            }
        }
    }
}
