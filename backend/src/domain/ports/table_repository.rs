//! Port for dining table persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::tables::{DiningTable, NewTable, TableChanges};
use crate::domain::{RestaurantId, SectionId, TableId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type TablePatch = Patch<TableId, TableChanges>;

#[async_trait]
pub trait TableRepository:
    Repository<Entity = DiningTable, Id = TableId, CreateInput = NewTable, UpdateInput = TablePatch>
{
    /// Case-insensitive label lookup within one restaurant.
    async fn find_by_label(
        &self,
        restaurant_id: &RestaurantId,
        label: &str,
    ) -> Result<Option<DiningTable>, RepositoryError>;

    /// Every table of a restaurant, active or not.
    async fn find_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<DiningTable>, RepositoryError>;

    async fn count_by_section(&self, section_id: &SectionId) -> Result<u64, RepositoryError>;

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<DiningTable>, RepositoryError>;
}
