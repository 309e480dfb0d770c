//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each feature port has a Diesel implementation here, backed by a shared
//! `bb8` pool of `diesel-async` connections.
//!
//! - **Thin adapters**: repositories only translate between row structs and
//!   domain types through the mappers in `mappers.rs`. Business rules stay in
//!   the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-aware errors**: unique, foreign key and check violations
//!   keep their constraint names so services can report conflicts.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use backend::outbound::persistence::{DbPool, DieselSectionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bistro")).await?;
//! let sections = DieselSectionRepository::new(pool, Arc::new(mockable::DefaultClock));
//! ```

mod diesel_helpers;
mod diesel_image_repository;
mod diesel_menu_repository;
mod diesel_repository;
mod diesel_reservation_repository;
mod diesel_restaurant_repository;
mod diesel_review_repository;
mod diesel_subscription_repository;
mod diesel_upgrade_request_repository;
mod mappers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_image_repository::DieselImageRepository;
pub use diesel_menu_repository::DieselMenuRepository;
pub use diesel_reservation_repository::DieselReservationRepository;
pub use diesel_restaurant_repository::{
    DieselRestaurantRepository, DieselSectionRepository, DieselTableRepository,
};
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_subscription_repository::{DieselPaymentRepository, DieselSubscriptionRepository};
pub use diesel_upgrade_request_repository::DieselUpgradeRequestRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
