//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod image_repository;
mod mapper;
mod menu_repository;
mod payment_repository;
mod repository;
mod reservation_repository;
mod restaurant_repository;
mod review_repository;
mod role_promotion;
mod section_repository;
mod subscription_repository;
mod table_repository;
mod upgrade_request_repository;

pub use image_repository::{ImagePatch, ImageRepository};
pub use mapper::{MappingError, OrmMapper, narrow, narrow_within, parse_variant};
pub use menu_repository::{MenuItemPatch, MenuRepository};
pub use payment_repository::{PaymentPatch, PaymentRepository};
pub use repository::{PageSlice, Patch, Repository, RepositoryError, repository_failure};
pub use reservation_repository::{ReservationPatch, ReservationRepository};
pub use restaurant_repository::{RestaurantPatch, RestaurantRepository};
pub use review_repository::{RatingTotals, ReviewPatch, ReviewRepository};
#[cfg(test)]
pub use role_promotion::MockRolePromotion;
pub use role_promotion::{FixtureRolePromotion, RolePromotion, RolePromotionError};
pub use section_repository::{SectionPatch, SectionRepository};
pub use subscription_repository::{SubscriptionPatch, SubscriptionRepository};
pub use table_repository::{TablePatch, TableRepository};
pub use upgrade_request_repository::{UpgradePatch, UpgradeRequestRepository};
