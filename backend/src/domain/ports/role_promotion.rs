//! Port granting roles in the external identity system.

use async_trait::async_trait;
use tracing::info;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by role promotion adapters.
    pub enum RolePromotionError {
        /// Identity provider could not be reached.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
        /// Identity provider refused the change.
        Rejected { message: String } =>
            "role promotion rejected: {message}",
    }
}

/// Grants the owner role once an upgrade request is approved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RolePromotion: Send + Sync {
    /// Make `user_id` a restaurant owner.
    async fn promote_to_owner(&self, user_id: &UserId) -> Result<(), RolePromotionError>;
}

/// Promotion adapter used until an identity provider is wired in.
///
/// It only records the promotion in the logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRolePromotion;

#[async_trait]
impl RolePromotion for FixtureRolePromotion {
    async fn promote_to_owner(&self, user_id: &UserId) -> Result<(), RolePromotionError> {
        info!(%user_id, "owner role granted");
        Ok(())
    }
}
