//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: hold every restaurant-management rule independently of HTTP and
//! storage. Features live in their own modules, each exposing a model, a
//! typed error convertible into [`Error`], and an application service generic
//! over the repository ports in [`ports`].
//!
//! Public surface:
//! - [`Error`]: transport-agnostic failure payload.
//! - [`ErrorCode`]: stable error identifier.
//! - [`Actor`] and [`Role`]: the caller identity handed to services.
//! - Typed ids, [`Money`], and the [`Entity`] lifecycle trait.

pub mod actor;
pub mod entity;
pub mod error;
pub mod ids;
pub mod money;
pub mod ports;
pub mod text_enum;
pub mod trace_id;
pub mod validation;

pub mod images;
pub mod menu;
pub mod payments;
pub mod reservations;
pub mod restaurants;
pub mod reviews;
pub mod sections;
pub mod subscriptions;
pub mod tables;
pub mod upgrades;

pub use self::actor::{Actor, Role};
pub use self::entity::Entity;
pub use self::error::{Error, ErrorCode, ErrorDto, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{
    ImageId, MenuItemId, PaymentId, ReservationId, RestaurantId, ReviewId, SectionId,
    SubscriptionId, TableId, UpgradeRequestId, UserId,
};
pub use self::money::{CurrencyCode, InvalidCurrency, Money};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
