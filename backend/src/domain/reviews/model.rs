//! Customer reviews of restaurants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{RestaurantId, ReviewId, UserId};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const COMMENT_MAX: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub restaurant_id: RestaurantId,
    pub author_id: UserId,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub restaurant_id: RestaurantId,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Validate for ReviewRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.range("rating", self.rating, MIN_RATING, MAX_RATING);
        errors.optional_text("comment", self.comment.as_deref(), COMMENT_MAX);
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub restaurant_id: RestaurantId,
    pub author_id: UserId,
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewChanges {
    pub rating: Option<u8>,
    pub comment: Option<Option<String>>,
}

impl Validate for ReviewChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(rating) = self.rating {
            errors.range("rating", rating, MIN_RATING, MAX_RATING);
        }
        if let Some(comment) = &self.comment {
            errors.optional_text("comment", comment.as_deref(), COMMENT_MAX);
        }
        errors.finish()
    }
}

/// Review count and mean rating for one restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub count: u64,
    /// `None` until the first review arrives.
    pub average: Option<f64>,
}

impl RatingSummary {
    /// Summarise `count` reviews whose ratings add up to `sum`.
    ///
    /// ```
    /// use backend::domain::reviews::RatingSummary;
    ///
    /// assert_eq!(RatingSummary::from_totals(0, 0).average, None);
    /// assert_eq!(RatingSummary::from_totals(4, 14).average, Some(3.5));
    /// ```
    pub fn from_totals(count: u64, sum: u64) -> Self {
        let average = (count > 0).then(|| sum as f64 / count as f64);
        Self { count, average }
    }
}

impl Entity for Review {
    type Id = ReviewId;
    type Draft = NewReview;
    type Changes = ReviewChanges;

    fn id(&self) -> ReviewId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewReview, now: DateTime<Utc>) -> Self {
        Self {
            id: ReviewId::random(),
            restaurant_id: draft.restaurant_id,
            author_id: draft.author_id,
            rating: draft.rating,
            comment: draft.comment,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ReviewChanges, now: DateTime<Utc>) {
        set_if(&mut self.rating, changes.rating);
        set_if(&mut self.comment, changes.comment);
        self.updated_at = now;
    }
}
