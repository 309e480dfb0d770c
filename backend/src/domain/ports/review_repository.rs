//! Port for review persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::reviews::{NewReview, Review, ReviewChanges};
use crate::domain::{RestaurantId, ReviewId, UserId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type ReviewPatch = Patch<ReviewId, ReviewChanges>;

/// Number of reviews and the sum of their ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTotals {
    pub count: u64,
    pub sum: u64,
}

#[async_trait]
pub trait ReviewRepository:
    Repository<Entity = Review, Id = ReviewId, CreateInput = NewReview, UpdateInput = ReviewPatch>
{
    async fn find_by_author(
        &self,
        restaurant_id: &RestaurantId,
        author_id: &UserId,
    ) -> Result<Option<Review>, RepositoryError>;

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Review>, RepositoryError>;

    async fn rating_totals(&self, restaurant_id: &RestaurantId)
    -> Result<RatingTotals, RepositoryError>;
}
