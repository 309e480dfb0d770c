//! Menu use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{MenuRepository, Patch, RestaurantRepository, repository_failure};
use crate::domain::restaurants::access::{load_managed_restaurant, load_restaurant};
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, MenuItemId, RestaurantId};

use super::{MenuError, MenuItem, MenuItemChanges, NewMenuItem};

pub struct MenuService<R, M> {
    restaurants: Arc<R>,
    items: Arc<M>,
}

impl<R, M> Clone for MenuService<R, M> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            items: Arc::clone(&self.items),
        }
    }
}

impl<R, M> MenuService<R, M>
where
    R: RestaurantRepository,
    M: MenuRepository,
{
    pub fn new(restaurants: Arc<R>, items: Arc<M>) -> Self {
        Self { restaurants, items }
    }

    pub async fn create(&self, actor: &Actor, item: NewMenuItem) -> Result<MenuItem, Error> {
        item.validate()?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, item.restaurant_id).await?;

        let created = self
            .items
            .create(item)
            .await
            .map_err(repository_failure("create menu item"))?;
        info!(menu_item_id = %created.id, price = %created.price, "menu item created");
        Ok(created)
    }

    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, Error> {
        self.load(id).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: MenuItemId,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, Error> {
        changes.validate()?;
        let item = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, item.restaurant_id).await?;

        self.items
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update menu item"))?
            .ok_or_else(|| MenuError::NotFound(id).into())
    }

    pub async fn delete(&self, actor: &Actor, id: MenuItemId) -> Result<(), Error> {
        let item = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, item.restaurant_id).await?;
        if !self
            .items
            .delete(&id)
            .await
            .map_err(repository_failure("delete menu item"))?
        {
            return Err(MenuError::NotFound(id).into());
        }
        info!(menu_item_id = %id, "menu item deleted");
        Ok(())
    }

    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
        available_only: bool,
        page: &PageRequest,
    ) -> Result<Paginated<MenuItem>, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let slice = self
            .items
            .find_page_by_restaurant(&restaurant_id, available_only, page)
            .await
            .map_err(repository_failure("list menu items"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn load(&self, id: MenuItemId) -> Result<MenuItem, Error> {
        self.items
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load menu item"))?
            .ok_or_else(|| MenuError::NotFound(id).into())
    }
}
