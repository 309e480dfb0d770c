//! Port for image metadata persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::images::{ImageChanges, NewImage, RestaurantImage};
use crate::domain::{ImageId, RestaurantId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type ImagePatch = Patch<ImageId, ImageChanges>;

#[async_trait]
pub trait ImageRepository:
    Repository<
        Entity = RestaurantImage,
        Id = ImageId,
        CreateInput = NewImage,
        UpdateInput = ImagePatch,
    >
{
    async fn find_primary(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Option<RestaurantImage>, RepositoryError>;

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<RestaurantImage>, RepositoryError>;
}
