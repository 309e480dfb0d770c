//! PostgreSQL-backed restaurant, section and dining table repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{
    OrmMapper, PageSlice, RepositoryError, RestaurantPatch, RestaurantRepository, SectionPatch,
    SectionRepository, TablePatch, TableRepository,
};
use crate::domain::restaurants::{NewRestaurant, Restaurant};
use crate::domain::sections::{NewSection, Section};
use crate::domain::tables::{DiningTable, NewTable};
use crate::domain::{RestaurantId, SectionId, TableId, UserId};

use super::diesel_helpers::{
    count_to_u64, lower, map_diesel_error, map_pool_error, page_window,
};
use super::diesel_repository::diesel_repository;
use super::mappers::{RestaurantMapper, SectionMapper, TableMapper};
use super::models::{RestaurantRow, SectionRow, TableRow};
use super::schema::{dining_tables, restaurants, sections};

diesel_repository! {
    /// Diesel-backed implementation of the `RestaurantRepository` port.
    DieselRestaurantRepository {
        entity: Restaurant,
        id: RestaurantId,
        create: NewRestaurant,
        update: RestaurantPatch,
        row: RestaurantRow,
        mapper: RestaurantMapper,
        table: restaurants,
        label: "restaurant",
    }
}

diesel_repository! {
    /// Diesel-backed implementation of the `SectionRepository` port.
    DieselSectionRepository {
        entity: Section,
        id: SectionId,
        create: NewSection,
        update: SectionPatch,
        row: SectionRow,
        mapper: SectionMapper,
        table: sections,
        label: "section",
    }
}

diesel_repository! {
    /// Diesel-backed implementation of the `TableRepository` port.
    DieselTableRepository {
        entity: DiningTable,
        id: TableId,
        create: NewTable,
        update: TablePatch,
        row: TableRow,
        mapper: TableMapper,
        table: dining_tables,
        label: "table",
    }
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn find_page(&self, page: &PageRequest) -> Result<PageSlice<Restaurant>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let total: i64 = restaurants::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count restaurants"))?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .order((restaurants::created_at.asc(), restaurants::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list restaurants"))?;
        Ok(PageSlice {
            items: RestaurantMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }

    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Restaurant>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let owner = *owner_id.as_uuid();
        let total: i64 = restaurants::table
            .filter(restaurants::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count owned restaurants"))?;
        let rows: Vec<RestaurantRow> = restaurants::table
            .filter(restaurants::owner_id.eq(owner))
            .order((restaurants::created_at.asc(), restaurants::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list owned restaurants"))?;
        Ok(PageSlice {
            items: RestaurantMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}

#[async_trait]
impl SectionRepository for DieselSectionRepository {
    async fn find_by_name(
        &self,
        restaurant_id: &RestaurantId,
        name: &str,
    ) -> Result<Option<Section>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = sections::table
            .filter(sections::restaurant_id.eq(*restaurant_id.as_uuid()))
            .filter(lower(sections::name).eq(name.trim().to_lowercase()))
            .select(SectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find section by name"))?;
        Ok(row.map(|row| SectionMapper.to_domain(row)).transpose()?)
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Section>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();
        let total: i64 = sections::table
            .filter(sections::restaurant_id.eq(restaurant))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count sections"))?;
        let rows: Vec<SectionRow> = sections::table
            .filter(sections::restaurant_id.eq(restaurant))
            .order((sections::created_at.asc(), sections::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(SectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list sections"))?;
        Ok(PageSlice {
            items: SectionMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}

#[async_trait]
impl TableRepository for DieselTableRepository {
    async fn find_by_label(
        &self,
        restaurant_id: &RestaurantId,
        label: &str,
    ) -> Result<Option<DiningTable>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = dining_tables::table
            .filter(dining_tables::restaurant_id.eq(*restaurant_id.as_uuid()))
            .filter(lower(dining_tables::label).eq(label.trim().to_lowercase()))
            .select(TableRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find table by label"))?;
        Ok(row.map(|row| TableMapper.to_domain(row)).transpose()?)
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<DiningTable>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TableRow> = dining_tables::table
            .filter(dining_tables::restaurant_id.eq(*restaurant_id.as_uuid()))
            .order((dining_tables::created_at.asc(), dining_tables::id.asc()))
            .select(TableRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list restaurant tables"))?;
        Ok(TableMapper.to_domain_list(rows)?)
    }

    async fn count_by_section(&self, section_id: &SectionId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = dining_tables::table
            .filter(dining_tables::section_id.eq(*section_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count section tables"))?;
        Ok(count_to_u64(total))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<DiningTable>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();
        let total: i64 = dining_tables::table
            .filter(dining_tables::restaurant_id.eq(restaurant))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count tables"))?;
        let rows: Vec<TableRow> = dining_tables::table
            .filter(dining_tables::restaurant_id.eq(restaurant))
            .order((dining_tables::created_at.asc(), dining_tables::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(TableRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list tables"))?;
        Ok(PageSlice {
            items: TableMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}
