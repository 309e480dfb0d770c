//! Port for section persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::sections::{NewSection, Section, SectionChanges};
use crate::domain::{RestaurantId, SectionId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type SectionPatch = Patch<SectionId, SectionChanges>;

#[async_trait]
pub trait SectionRepository:
    Repository<Entity = Section, Id = SectionId, CreateInput = NewSection, UpdateInput = SectionPatch>
{
    /// Case-insensitive name lookup within one restaurant.
    async fn find_by_name(
        &self,
        restaurant_id: &RestaurantId,
        name: &str,
    ) -> Result<Option<Section>, RepositoryError>;

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Section>, RepositoryError>;
}
