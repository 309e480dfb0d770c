//! Restaurant use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{Patch, ReservationRepository, RestaurantRepository, repository_failure};
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, RestaurantId, UserId};

use super::access::{load_managed_restaurant, load_restaurant};
use super::{CreateRestaurant, NewRestaurant, Restaurant, RestaurantChanges, RestaurantError};

/// Creates, edits, and lists restaurants.
pub struct RestaurantService<R, V> {
    restaurants: Arc<R>,
    reservations: Arc<V>,
}

impl<R, V> Clone for RestaurantService<R, V> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            reservations: Arc::clone(&self.reservations),
        }
    }
}

impl<R, V> RestaurantService<R, V>
where
    R: RestaurantRepository,
    V: ReservationRepository,
{
    pub fn new(restaurants: Arc<R>, reservations: Arc<V>) -> Self {
        Self {
            restaurants,
            reservations,
        }
    }

    /// Register a restaurant owned by the caller.
    ///
    /// Admins may name another owner through `owner_id`.
    pub async fn create(&self, actor: &Actor, request: CreateRestaurant) -> Result<Restaurant, Error> {
        if !actor.can_manage_restaurants() {
            return Err(RestaurantError::OwnerRoleRequired.into());
        }
        request.validate()?;

        let owner_id = match request.owner_id {
            Some(owner) if owner != actor.user_id && !actor.is_admin() => {
                return Err(RestaurantError::ForeignOwner.into());
            }
            Some(owner) => owner,
            None => actor.user_id,
        };

        let restaurant = self
            .restaurants
            .create(NewRestaurant::from_request(request, owner_id))
            .await
            .map_err(repository_failure("create restaurant"))?;
        info!(restaurant_id = %restaurant.id, owner_id = %restaurant.owner_id, "restaurant created");
        Ok(restaurant)
    }

    pub async fn get(&self, id: RestaurantId) -> Result<Restaurant, Error> {
        load_restaurant(self.restaurants.as_ref(), id).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: RestaurantId,
        changes: RestaurantChanges,
    ) -> Result<Restaurant, Error> {
        changes.validate()?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, id).await?;

        self.restaurants
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update restaurant"))?
            .ok_or_else(|| RestaurantError::NotFound(id).into())
    }

    /// Remove a restaurant together with its sections, tables, menu, reviews
    /// and images. Restaurants with any booking history are kept.
    pub async fn delete(&self, actor: &Actor, id: RestaurantId) -> Result<(), Error> {
        load_managed_restaurant(self.restaurants.as_ref(), actor, id).await?;

        let reservations = self
            .reservations
            .count_by_restaurant(&id)
            .await
            .map_err(repository_failure("count restaurant reservations"))?;
        if reservations > 0 {
            return Err(RestaurantError::HasReservations { id, reservations }.into());
        }

        let removed = self
            .restaurants
            .delete(&id)
            .await
            .map_err(repository_failure("delete restaurant"))?;
        if !removed {
            return Err(RestaurantError::NotFound(id).into());
        }
        info!(restaurant_id = %id, "restaurant deleted");
        Ok(())
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Paginated<Restaurant>, Error> {
        let slice = self
            .restaurants
            .find_page(page)
            .await
            .map_err(repository_failure("list restaurants"))?;
        Ok(slice.into_paginated(page)?)
    }

    pub async fn list_for_owner(
        &self,
        owner_id: UserId,
        page: &PageRequest,
    ) -> Result<Paginated<Restaurant>, Error> {
        let slice = self
            .restaurants
            .find_page_by_owner(&owner_id, page)
            .await
            .map_err(repository_failure("list owner restaurants"))?;
        Ok(slice.into_paginated(page)?)
    }
}
