//! Restaurants: the aggregate every other feature hangs off.

pub(crate) mod access;
mod error;
mod model;
mod service;

pub use error::RestaurantError;
pub use model::{
    ADDRESS_MAX, CreateRestaurant, DESCRIPTION_MAX, NAME_MAX, NewRestaurant, OpeningHours,
    PHONE_MAX, Restaurant, RestaurantChanges,
};
pub use service::RestaurantService;
