//! Port for subscription persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::subscriptions::{NewSubscription, Subscription, SubscriptionChanges};
use crate::domain::{SubscriptionId, UserId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type SubscriptionPatch = Patch<SubscriptionId, SubscriptionChanges>;

#[async_trait]
pub trait SubscriptionRepository:
    Repository<
        Entity = Subscription,
        Id = SubscriptionId,
        CreateInput = NewSubscription,
        UpdateInput = SubscriptionPatch,
    >
{
    /// Subscriptions of `owner_id` whose status is still active, whether or
    /// not their term has run out.
    async fn find_active_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Subscription>, RepositoryError>;

    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Subscription>, RepositoryError>;
}
