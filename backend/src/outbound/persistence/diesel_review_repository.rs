//! PostgreSQL-backed `ReviewRepository` implementation.

use async_trait::async_trait;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{
    OrmMapper, PageSlice, RatingTotals, RepositoryError, ReviewPatch, ReviewRepository,
};
use crate::domain::reviews::{NewReview, Review};
use crate::domain::{RestaurantId, ReviewId, UserId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::ReviewMapper;
use super::models::ReviewRow;
use super::schema::reviews;

diesel_repository! {
    /// Diesel-backed implementation of the `ReviewRepository` port.
    DieselReviewRepository {
        entity: Review,
        id: ReviewId,
        create: NewReview,
        update: ReviewPatch,
        row: ReviewRow,
        mapper: ReviewMapper,
        table: reviews,
        label: "review",
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn find_by_author(
        &self,
        restaurant_id: &RestaurantId,
        author_id: &UserId,
    ) -> Result<Option<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = reviews::table
            .filter(reviews::restaurant_id.eq(*restaurant_id.as_uuid()))
            .filter(reviews::author_id.eq(*author_id.as_uuid()))
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find review by author"))?;
        Ok(row.map(|row| ReviewMapper.to_domain(row)).transpose()?)
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Review>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let restaurant = *restaurant_id.as_uuid();
        let total: i64 = reviews::table
            .filter(reviews::restaurant_id.eq(restaurant))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count reviews"))?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::restaurant_id.eq(restaurant))
            .order((reviews::created_at.asc(), reviews::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list reviews"))?;
        Ok(PageSlice {
            items: ReviewMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }

    async fn rating_totals(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<RatingTotals, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (count, rating_sum): (i64, Option<i64>) = reviews::table
            .filter(reviews::restaurant_id.eq(*restaurant_id.as_uuid()))
            .select((count_star(), sum(reviews::rating)))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "sum review ratings"))?;
        Ok(RatingTotals {
            count: count_to_u64(count),
            sum: count_to_u64(rating_sum.unwrap_or_default()),
        })
    }
}
