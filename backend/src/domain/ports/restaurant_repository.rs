//! Port for restaurant persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::UserId;
use crate::domain::restaurants::{NewRestaurant, Restaurant, RestaurantChanges};
use crate::domain::RestaurantId;

use super::{PageSlice, Patch, Repository, RepositoryError};

/// Update input for restaurants.
pub type RestaurantPatch = Patch<RestaurantId, RestaurantChanges>;

/// Restaurant storage with paged listings.
#[async_trait]
pub trait RestaurantRepository:
    Repository<
        Entity = Restaurant,
        Id = RestaurantId,
        CreateInput = NewRestaurant,
        UpdateInput = RestaurantPatch,
    >
{
    /// One page of all restaurants in creation order.
    async fn find_page(&self, page: &PageRequest) -> Result<PageSlice<Restaurant>, RepositoryError>;

    /// One page of the restaurants held by `owner_id`.
    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Restaurant>, RepositoryError>;
}
