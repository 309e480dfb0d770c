//! Restaurant lookups shared by every feature scoped to a restaurant.

use crate::domain::ports::{RestaurantRepository, repository_failure};
use crate::domain::{Actor, Error, RestaurantId};

use super::{Restaurant, RestaurantError};

/// Load a restaurant or fail with not found.
pub(crate) async fn load_restaurant<R>(restaurants: &R, id: RestaurantId) -> Result<Restaurant, Error>
where
    R: RestaurantRepository + ?Sized,
{
    restaurants
        .find_by_id(&id)
        .await
        .map_err(repository_failure("load restaurant"))?
        .ok_or_else(|| RestaurantError::NotFound(id).into())
}

/// Load a restaurant the actor owns, or any restaurant for admins.
pub(crate) async fn load_managed_restaurant<R>(
    restaurants: &R,
    actor: &Actor,
    id: RestaurantId,
) -> Result<Restaurant, Error>
where
    R: RestaurantRepository + ?Sized,
{
    let restaurant = load_restaurant(restaurants, id).await?;
    ensure_manages(actor, &restaurant)?;
    Ok(restaurant)
}

pub(crate) fn ensure_manages(actor: &Actor, restaurant: &Restaurant) -> Result<(), Error> {
    if actor.acts_for(restaurant.owner_id) {
        Ok(())
    } else {
        Err(RestaurantError::NotOwner {
            restaurant_id: restaurant.id,
            user_id: actor.user_id,
        }
        .into())
    }
}
