//! Review use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{Patch, RestaurantRepository, ReviewRepository, repository_failure};
use crate::domain::restaurants::access::load_restaurant;
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, RestaurantId, ReviewId};

use super::{NewReview, RatingSummary, Review, ReviewChanges, ReviewError, ReviewRequest};

pub struct ReviewService<R, V> {
    restaurants: Arc<R>,
    reviews: Arc<V>,
}

impl<R, V> Clone for ReviewService<R, V> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            reviews: Arc::clone(&self.reviews),
        }
    }
}

impl<R, V> ReviewService<R, V>
where
    R: RestaurantRepository,
    V: ReviewRepository,
{
    pub fn new(restaurants: Arc<R>, reviews: Arc<V>) -> Self {
        Self {
            restaurants,
            reviews,
        }
    }

    /// Publish the caller's review. One review per author and restaurant.
    pub async fn create(&self, actor: &Actor, request: ReviewRequest) -> Result<Review, Error> {
        request.validate()?;
        let restaurant = load_restaurant(self.restaurants.as_ref(), request.restaurant_id).await?;
        if restaurant.owner_id == actor.user_id {
            return Err(ReviewError::OwnRestaurant {
                restaurant_id: restaurant.id,
            }
            .into());
        }

        let existing = self
            .reviews
            .find_by_author(&restaurant.id, &actor.user_id)
            .await
            .map_err(repository_failure("check existing review"))?;
        if let Some(review) = existing {
            return Err(ReviewError::AlreadyReviewed {
                restaurant_id: restaurant.id,
                author_id: actor.user_id,
                existing: review.id,
            }
            .into());
        }

        let review = self
            .reviews
            .create(NewReview {
                restaurant_id: restaurant.id,
                author_id: actor.user_id,
                rating: request.rating,
                comment: request.comment,
            })
            .await
            .map_err(repository_failure("create review"))?;
        info!(review_id = %review.id, restaurant_id = %review.restaurant_id, rating = review.rating, "review created");
        Ok(review)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: ReviewId,
        changes: ReviewChanges,
    ) -> Result<Review, Error> {
        changes.validate()?;
        let review = self.load(id).await?;
        if review.author_id != actor.user_id {
            return Err(ReviewError::NotAuthor {
                id,
                user_id: actor.user_id,
            }
            .into());
        }

        self.reviews
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update review"))?
            .ok_or_else(|| ReviewError::NotFound(id).into())
    }

    /// Authors withdraw their own reviews; admins moderate any.
    pub async fn delete(&self, actor: &Actor, id: ReviewId) -> Result<(), Error> {
        let review = self.load(id).await?;
        if !actor.acts_for(review.author_id) {
            return Err(ReviewError::NotAuthor {
                id,
                user_id: actor.user_id,
            }
            .into());
        }
        if !self
            .reviews
            .delete(&id)
            .await
            .map_err(repository_failure("delete review"))?
        {
            return Err(ReviewError::NotFound(id).into());
        }
        info!(review_id = %id, "review deleted");
        Ok(())
    }

    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
        page: &PageRequest,
    ) -> Result<Paginated<Review>, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let slice = self
            .reviews
            .find_page_by_restaurant(&restaurant_id, page)
            .await
            .map_err(repository_failure("list reviews"))?;
        Ok(slice.into_paginated(page)?)
    }

    pub async fn summary(&self, restaurant_id: RestaurantId) -> Result<RatingSummary, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let totals = self
            .reviews
            .rating_totals(&restaurant_id)
            .await
            .map_err(repository_failure("summarise ratings"))?;
        Ok(RatingSummary::from_totals(totals.count, totals.sum))
    }

    async fn load(&self, id: ReviewId) -> Result<Review, Error> {
        self.reviews
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load review"))?
            .ok_or_else(|| ReviewError::NotFound(id).into())
    }
}
