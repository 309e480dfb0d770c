//! The authenticated caller handed to application services.
//!
//! Authentication itself happens outside this crate; services only see the
//! resolved identity and role.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Coarse role of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Books tables and writes reviews.
    Customer,
    /// Manages their own restaurants.
    Owner,
    /// Operates the platform; bypasses ownership checks.
    Admin,
}

/// Identity and role of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub const fn customer(user_id: UserId) -> Self {
        Self::new(user_id, Role::Customer)
    }

    pub const fn owner(user_id: UserId) -> Self {
        Self::new(user_id, Role::Owner)
    }

    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Whether the actor may manage restaurant data at all.
    pub const fn can_manage_restaurants(&self) -> bool {
        matches!(self.role, Role::Owner | Role::Admin)
    }

    /// Admins act on anything; everyone else only on what `owner` holds.
    pub fn acts_for(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}
