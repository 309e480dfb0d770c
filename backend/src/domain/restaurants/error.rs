//! Restaurant failures surfaced to callers.

use serde_json::json;

use crate::domain::{Error, RestaurantId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantError {
    #[error("restaurant {0} was not found")]
    NotFound(RestaurantId),
    #[error("user {user_id} does not manage restaurant {restaurant_id}")]
    NotOwner {
        restaurant_id: RestaurantId,
        user_id: UserId,
    },
    #[error("only owners and admins may create restaurants")]
    OwnerRoleRequired,
    #[error("only admins may create restaurants for another owner")]
    ForeignOwner,
    #[error("restaurant {id} still has {reservations} reservations on record")]
    HasReservations { id: RestaurantId, reservations: u64 },
}

impl From<RestaurantError> for Error {
    fn from(value: RestaurantError) -> Self {
        let message = value.to_string();
        match value {
            RestaurantError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "restaurant_not_found", "restaurantId": id })),
            RestaurantError::NotOwner {
                restaurant_id,
                user_id,
            } => Error::forbidden(message).with_details(json!({
                "code": "not_restaurant_owner",
                "restaurantId": restaurant_id,
                "userId": user_id,
            })),
            RestaurantError::OwnerRoleRequired => {
                Error::forbidden(message).with_details(json!({ "code": "owner_role_required" }))
            }
            RestaurantError::ForeignOwner => {
                Error::forbidden(message).with_details(json!({ "code": "foreign_owner" }))
            }
            RestaurantError::HasReservations { id, reservations } => {
                Error::conflict(message).with_details(json!({
                    "code": "restaurant_has_reservations",
                    "restaurantId": id,
                    "reservations": reservations,
                }))
            }
        }
    }
}
