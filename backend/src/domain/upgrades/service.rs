//! Upgrade request use cases.

use std::sync::Arc;

use mockable::Clock;
use pagination::{PageRequest, Paginated};
use tracing::{info, warn};

use crate::domain::ports::{Patch, RolePromotion, UpgradeRequestRepository, repository_failure};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{Actor, Error, UpgradeRequestId};

use super::{
    NewUpgradeRequest, REASON_MAX, SubmitUpgrade, UpgradeChanges, UpgradeDecision, UpgradeError,
    UpgradeRequest, UpgradeStatus,
};

pub struct UpgradeService<U, P: ?Sized> {
    requests: Arc<U>,
    promotion: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<U, P: ?Sized> Clone for UpgradeService<U, P> {
    fn clone(&self) -> Self {
        Self {
            requests: Arc::clone(&self.requests),
            promotion: Arc::clone(&self.promotion),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<U, P> UpgradeService<U, P>
where
    U: UpgradeRequestRepository,
    P: RolePromotion + ?Sized,
{
    pub fn new(requests: Arc<U>, promotion: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            promotion,
            clock,
        }
    }

    /// File a request for the calling customer.
    pub async fn submit(&self, actor: &Actor, request: SubmitUpgrade) -> Result<UpgradeRequest, Error> {
        if actor.can_manage_restaurants() {
            return Err(UpgradeError::AlreadyOwner(actor.user_id).into());
        }
        request.validate()?;

        let pending = self
            .requests
            .find_pending_by_user(&actor.user_id)
            .await
            .map_err(repository_failure("check pending upgrade request"))?;
        if let Some(existing) = pending {
            return Err(UpgradeError::AlreadyPending {
                user_id: actor.user_id,
                existing: existing.id,
            }
            .into());
        }

        let created = self
            .requests
            .create(NewUpgradeRequest {
                user_id: actor.user_id,
                business_name: request.business_name,
                message: request.message,
            })
            .await
            .map_err(repository_failure("submit upgrade request"))?;
        info!(request_id = %created.id, user_id = %created.user_id, "upgrade request submitted");
        Ok(created)
    }

    /// Grant the owner role, then record the approval.
    ///
    /// When the identity system refuses, the request stays pending.
    pub async fn approve(&self, actor: &Actor, id: UpgradeRequestId) -> Result<UpgradeRequest, Error> {
        let request = self.load_pending(actor, id).await?;
        self.promotion
            .promote_to_owner(&request.user_id)
            .await
            .map_err(|error| {
                warn!(%error, request_id = %id, "role promotion failed");
                UpgradeError::Promotion(error.to_string())
            })?;
        self.decide(actor, id, UpgradeStatus::Approved, None).await
    }

    pub async fn reject(
        &self,
        actor: &Actor,
        id: UpgradeRequestId,
        reason: String,
    ) -> Result<UpgradeRequest, Error> {
        let mut errors = ValidationErrors::new();
        errors.text("reason", &reason, REASON_MAX);
        errors.finish()?;

        self.load_pending(actor, id).await?;
        self.decide(actor, id, UpgradeStatus::Rejected, Some(reason.trim().to_owned()))
            .await
    }

    /// Visible to the requester and admins.
    pub async fn get(&self, actor: &Actor, id: UpgradeRequestId) -> Result<UpgradeRequest, Error> {
        let request = self.load(id).await?;
        if !actor.acts_for(request.user_id) {
            return Err(UpgradeError::NotRequester {
                id,
                user_id: actor.user_id,
            }
            .into());
        }
        Ok(request)
    }

    pub async fn list(
        &self,
        actor: &Actor,
        status: Option<UpgradeStatus>,
        page: &PageRequest,
    ) -> Result<Paginated<UpgradeRequest>, Error> {
        if !actor.is_admin() {
            return Err(UpgradeError::AdminRequired.into());
        }
        let slice = self
            .requests
            .find_page(status, page)
            .await
            .map_err(repository_failure("list upgrade requests"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn load_pending(
        &self,
        actor: &Actor,
        id: UpgradeRequestId,
    ) -> Result<UpgradeRequest, Error> {
        if !actor.is_admin() {
            return Err(UpgradeError::AdminRequired.into());
        }
        let request = self.load(id).await?;
        if request.status != UpgradeStatus::Pending {
            return Err(UpgradeError::AlreadyDecided {
                id,
                status: request.status,
            }
            .into());
        }
        Ok(request)
    }

    async fn decide(
        &self,
        actor: &Actor,
        id: UpgradeRequestId,
        status: UpgradeStatus,
        rejection_reason: Option<String>,
    ) -> Result<UpgradeRequest, Error> {
        let changes = UpgradeChanges {
            decision: Some(UpgradeDecision {
                status,
                decided_by: actor.user_id,
                decided_at: self.clock.utc(),
                rejection_reason,
            }),
            ..UpgradeChanges::default()
        };
        let decided = self
            .requests
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("record upgrade decision"))?
            .ok_or(UpgradeError::NotFound(id))?;
        info!(request_id = %id, status = %status, decided_by = %actor.user_id, "upgrade request decided");
        Ok(decided)
    }

    async fn load(&self, id: UpgradeRequestId) -> Result<UpgradeRequest, Error> {
        self.requests
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load upgrade request"))?
            .ok_or_else(|| UpgradeError::NotFound(id).into())
    }
}
