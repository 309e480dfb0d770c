//! Port for owner upgrade request persistence.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::upgrades::{NewUpgradeRequest, UpgradeChanges, UpgradeRequest, UpgradeStatus};
use crate::domain::{UpgradeRequestId, UserId};

use super::{PageSlice, Patch, Repository, RepositoryError};

pub type UpgradePatch = Patch<UpgradeRequestId, UpgradeChanges>;

#[async_trait]
pub trait UpgradeRequestRepository:
    Repository<
        Entity = UpgradeRequest,
        Id = UpgradeRequestId,
        CreateInput = NewUpgradeRequest,
        UpdateInput = UpgradePatch,
    >
{
    async fn find_pending_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UpgradeRequest>, RepositoryError>;

    /// One page of requests, optionally restricted to one status.
    async fn find_page(
        &self,
        status: Option<UpgradeStatus>,
        page: &PageRequest,
    ) -> Result<PageSlice<UpgradeRequest>, RepositoryError>;
}
