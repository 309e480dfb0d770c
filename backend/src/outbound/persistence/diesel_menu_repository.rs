//! PostgreSQL-backed `MenuRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::menu::{MenuItem, NewMenuItem};
use crate::domain::ports::{MenuItemPatch, MenuRepository, OrmMapper, PageSlice, RepositoryError};
use crate::domain::{MenuItemId, RestaurantId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::MenuItemMapper;
use super::models::MenuItemRow;
use super::schema::menu_items;

diesel_repository! {
    /// Diesel-backed implementation of the `MenuRepository` port.
    DieselMenuRepository {
        entity: MenuItem,
        id: MenuItemId,
        create: NewMenuItem,
        update: MenuItemPatch,
        row: MenuItemRow,
        mapper: MenuItemMapper,
        table: menu_items,
        label: "menu item",
    }
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        available_only: bool,
        page: &PageRequest,
    ) -> Result<PageSlice<MenuItem>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();

        let mut count_query = menu_items::table
            .filter(menu_items::restaurant_id.eq(restaurant))
            .into_boxed();
        let mut page_query = menu_items::table
            .filter(menu_items::restaurant_id.eq(restaurant))
            .into_boxed();
        if available_only {
            count_query = count_query.filter(menu_items::is_available.eq(true));
            page_query = page_query.filter(menu_items::is_available.eq(true));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count menu items"))?;
        let rows: Vec<MenuItemRow> = page_query
            .order((menu_items::created_at.asc(), menu_items::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(MenuItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list menu items"))?;
        Ok(PageSlice {
            items: MenuItemMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}
