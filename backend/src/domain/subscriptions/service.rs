//! Subscription use cases.

use std::sync::Arc;

use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{Patch, SubscriptionRepository, repository_failure};
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, SubscriptionId, UserId};

use super::{
    NewSubscription, SubscribeRequest, Subscription, SubscriptionChanges, SubscriptionError,
    SubscriptionStatus,
};

pub struct SubscriptionService<S> {
    subscriptions: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for SubscriptionService<S> {
    fn clone(&self) -> Self {
        Self {
            subscriptions: Arc::clone(&self.subscriptions),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S> SubscriptionService<S>
where
    S: SubscriptionRepository,
{
    pub fn new(subscriptions: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscriptions,
            clock,
        }
    }

    /// Start a plan for the calling owner, starting now.
    ///
    /// Active subscriptions whose term already ran out are marked expired
    /// first, so they never block a renewal.
    pub async fn subscribe(
        &self,
        actor: &Actor,
        request: SubscribeRequest,
    ) -> Result<Subscription, Error> {
        if !actor.can_manage_restaurants() {
            return Err(SubscriptionError::OwnerRoleRequired.into());
        }
        request.validate()?;

        if let Some(current) = self.refresh_active(actor.user_id).await? {
            return Err(SubscriptionError::AlreadySubscribed {
                owner_id: actor.user_id,
                existing: current.id,
            }
            .into());
        }

        let subscription = self
            .subscriptions
            .create(NewSubscription {
                owner_id: actor.user_id,
                plan: request.plan,
                months: request.months,
                starts_at: self.clock.utc(),
            })
            .await
            .map_err(repository_failure("create subscription"))?;
        info!(
            subscription_id = %subscription.id,
            plan = %subscription.plan,
            expires_at = %subscription.expires_at,
            "subscription started"
        );
        Ok(subscription)
    }

    pub async fn cancel(&self, actor: &Actor, id: SubscriptionId) -> Result<Subscription, Error> {
        let subscription = self.load(id).await?;
        if !actor.acts_for(subscription.owner_id) {
            return Err(SubscriptionError::NotHolder {
                id,
                user_id: actor.user_id,
            }
            .into());
        }
        if subscription.status != SubscriptionStatus::Active {
            return Err(SubscriptionError::NotActive {
                id,
                status: subscription.status,
            }
            .into());
        }

        let changes = SubscriptionChanges {
            status: Some(SubscriptionStatus::Cancelled),
            cancelled_at: Some(Some(self.clock.utc())),
        };
        let cancelled = self
            .subscriptions
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("cancel subscription"))?
            .ok_or(SubscriptionError::NotFound(id))?;
        info!(subscription_id = %id, "subscription cancelled");
        Ok(cancelled)
    }

    /// The owner's subscription that is active and unexpired right now.
    pub async fn active_for_owner(&self, owner_id: UserId) -> Result<Option<Subscription>, Error> {
        let now = self.clock.utc();
        let active = self
            .subscriptions
            .find_active_by_owner(&owner_id)
            .await
            .map_err(repository_failure("load active subscription"))?;
        Ok(active.into_iter().find(|subscription| subscription.is_current(now)))
    }

    pub async fn list_for_owner(
        &self,
        actor: &Actor,
        owner_id: UserId,
        page: &PageRequest,
    ) -> Result<Paginated<Subscription>, Error> {
        if !actor.acts_for(owner_id) {
            return Err(SubscriptionError::ForeignOwner {
                owner_id,
                user_id: actor.user_id,
            }
            .into());
        }
        let slice = self
            .subscriptions
            .find_page_by_owner(&owner_id, page)
            .await
            .map_err(repository_failure("list subscriptions"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn refresh_active(&self, owner_id: UserId) -> Result<Option<Subscription>, Error> {
        let now = self.clock.utc();
        let active = self
            .subscriptions
            .find_active_by_owner(&owner_id)
            .await
            .map_err(repository_failure("load active subscription"))?;

        let mut current = None;
        for subscription in active {
            if subscription.is_lapsed(now) {
                let changes = SubscriptionChanges {
                    status: Some(SubscriptionStatus::Expired),
                    ..SubscriptionChanges::default()
                };
                self.subscriptions
                    .update(Patch::new(subscription.id, changes))
                    .await
                    .map_err(repository_failure("expire subscription"))?;
                info!(subscription_id = %subscription.id, "subscription expired");
            } else if current.is_none() {
                current = Some(subscription);
            }
        }
        Ok(current)
    }

    async fn load(&self, id: SubscriptionId) -> Result<Subscription, Error> {
        self.subscriptions
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load subscription"))?
            .ok_or_else(|| SubscriptionError::NotFound(id).into())
    }
}
