//! Strongly typed UUID identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of an account in the external identity system.
    UserId
);
define_id!(
    /// Identifier of a restaurant.
    RestaurantId
);
define_id!(
    /// Identifier of a floor section within a restaurant.
    SectionId
);
define_id!(
    /// Identifier of a dining table.
    TableId
);
define_id!(
    /// Identifier of a menu item.
    MenuItemId
);
define_id!(
    /// Identifier of a reservation.
    ReservationId
);
define_id!(
    /// Identifier of a review.
    ReviewId
);
define_id!(
    /// Identifier of an owner subscription.
    SubscriptionId
);
define_id!(
    /// Identifier of a payment.
    PaymentId
);
define_id!(
    /// Identifier of a restaurant image.
    ImageId
);
define_id!(
    /// Identifier of an owner upgrade request.
    UpgradeRequestId
);
