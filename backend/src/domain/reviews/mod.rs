//! Restaurant reviews and rating summaries.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, RestaurantId, ReviewId, UserId};

pub use model::{
    COMMENT_MAX, MAX_RATING, MIN_RATING, NewReview, RatingSummary, Review, ReviewChanges,
    ReviewRequest,
};
pub use service::ReviewService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("review {0} was not found")]
    NotFound(ReviewId),
    #[error("user {author_id} already reviewed restaurant {restaurant_id}")]
    AlreadyReviewed {
        restaurant_id: RestaurantId,
        author_id: UserId,
        existing: ReviewId,
    },
    #[error("owners may not review their own restaurant")]
    OwnRestaurant { restaurant_id: RestaurantId },
    #[error("user {user_id} did not write review {id}")]
    NotAuthor { id: ReviewId, user_id: UserId },
}

impl From<ReviewError> for Error {
    fn from(value: ReviewError) -> Self {
        let message = value.to_string();
        match value {
            ReviewError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "review_not_found", "reviewId": id })),
            ReviewError::AlreadyReviewed {
                restaurant_id,
                author_id,
                existing,
            } => Error::conflict(message).with_details(json!({
                "code": "already_reviewed",
                "restaurantId": restaurant_id,
                "authorId": author_id,
                "reviewId": existing,
            })),
            ReviewError::OwnRestaurant { restaurant_id } => Error::forbidden(message)
                .with_details(json!({ "code": "own_restaurant", "restaurantId": restaurant_id })),
            ReviewError::NotAuthor { id, user_id } => {
                Error::forbidden(message).with_details(json!({
                    "code": "not_review_author",
                    "reviewId": id,
                    "userId": user_id,
                }))
            }
        }
    }
}
