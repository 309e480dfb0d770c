//! Port for menu persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::menu::{MenuItem, MenuItemChanges, NewMenuItem};
use crate::domain::{MenuItemId, RestaurantId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type MenuItemPatch = Patch<MenuItemId, MenuItemChanges>;

#[async_trait]
pub trait MenuRepository:
    Repository<
        Entity = MenuItem,
        Id = MenuItemId,
        CreateInput = NewMenuItem,
        UpdateInput = MenuItemPatch,
    >
{
    /// One page of a restaurant's menu, optionally only available items.
    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        available_only: bool,
        page: &PageRequest,
    ) -> Result<PageSlice<MenuItem>, RepositoryError>;
}
