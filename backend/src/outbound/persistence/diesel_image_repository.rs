//! PostgreSQL-backed `ImageRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::images::{NewImage, RestaurantImage};
use crate::domain::ports::{ImagePatch, ImageRepository, OrmMapper, PageSlice, RepositoryError};
use crate::domain::{ImageId, RestaurantId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::ImageMapper;
use super::models::ImageRow;
use super::schema::restaurant_images;

diesel_repository! {
    /// Diesel-backed implementation of the `ImageRepository` port.
    DieselImageRepository {
        entity: RestaurantImage,
        id: ImageId,
        create: NewImage,
        update: ImagePatch,
        row: ImageRow,
        mapper: ImageMapper,
        table: restaurant_images,
        label: "image",
    }
}

#[async_trait]
impl ImageRepository for DieselImageRepository {
    async fn find_primary(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Option<RestaurantImage>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = restaurant_images::table
            .filter(restaurant_images::restaurant_id.eq(*restaurant_id.as_uuid()))
            .filter(restaurant_images::is_primary.eq(true))
            .select(ImageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find primary image"))?;
        Ok(row.map(|row| ImageMapper.to_domain(row)).transpose()?)
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<RestaurantImage>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();
        let total: i64 = restaurant_images::table
            .filter(restaurant_images::restaurant_id.eq(restaurant))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count images"))?;
        let rows: Vec<ImageRow> = restaurant_images::table
            .filter(restaurant_images::restaurant_id.eq(restaurant))
            .order((restaurant_images::created_at.asc(), restaurant_images::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(ImageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list images"))?;
        Ok(PageSlice {
            items: ImageMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}
