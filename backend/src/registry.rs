//! Composition root for the application services.
//!
//! A [`Storage`] names one repository type per feature port. The registry
//! builds every service over those repositories, sharing one `Arc` per
//! repository, so the same service code runs against Postgres in production
//! and against process memory in tests or when no database is configured.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::Entity;
use crate::domain::images::{ImageService, RestaurantImage};
use crate::domain::menu::{MenuItem, MenuService};
use crate::domain::payments::{Payment, PaymentService};
use crate::domain::ports::{
    FixtureRolePromotion, ImageRepository, MenuRepository, PaymentRepository,
    ReservationRepository, RestaurantRepository, ReviewRepository, RolePromotion,
    SectionRepository, SubscriptionRepository, TableRepository, UpgradeRequestRepository,
};
use crate::domain::reservations::{Reservation, ReservationService};
use crate::domain::restaurants::{Restaurant, RestaurantService};
use crate::domain::reviews::{Review, ReviewService};
use crate::domain::sections::{Section, SectionService};
use crate::domain::subscriptions::{Subscription, SubscriptionService};
use crate::domain::tables::{DiningTable, TableService};
use crate::domain::upgrades::{UpgradeRequest, UpgradeService};
use crate::outbound::memory::InMemoryRepository;
use crate::outbound::persistence::{
    DbPool, DieselImageRepository, DieselMenuRepository, DieselPaymentRepository,
    DieselReservationRepository, DieselRestaurantRepository, DieselReviewRepository,
    DieselSectionRepository, DieselSubscriptionRepository, DieselTableRepository,
    DieselUpgradeRequestRepository,
};

/// One repository type per feature port.
pub trait Storage: 'static {
    type Restaurants: RestaurantRepository + 'static;
    type Sections: SectionRepository + 'static;
    type Tables: TableRepository + 'static;
    type Menu: MenuRepository + 'static;
    type Reservations: ReservationRepository + 'static;
    type Reviews: ReviewRepository + 'static;
    type Subscriptions: SubscriptionRepository + 'static;
    type Payments: PaymentRepository + 'static;
    type Images: ImageRepository + 'static;
    type UpgradeRequests: UpgradeRequestRepository + 'static;
}

/// Process-local storage.
pub enum InMemoryStorage {}

impl Storage for InMemoryStorage {
    type Restaurants = InMemoryRepository<Restaurant>;
    type Sections = InMemoryRepository<Section>;
    type Tables = InMemoryRepository<DiningTable>;
    type Menu = InMemoryRepository<MenuItem>;
    type Reservations = InMemoryRepository<Reservation>;
    type Reviews = InMemoryRepository<Review>;
    type Subscriptions = InMemoryRepository<Subscription>;
    type Payments = InMemoryRepository<Payment>;
    type Images = InMemoryRepository<RestaurantImage>;
    type UpgradeRequests = InMemoryRepository<UpgradeRequest>;
}

/// Diesel-backed PostgreSQL storage.
pub enum PostgresStorage {}

impl Storage for PostgresStorage {
    type Restaurants = DieselRestaurantRepository;
    type Sections = DieselSectionRepository;
    type Tables = DieselTableRepository;
    type Menu = DieselMenuRepository;
    type Reservations = DieselReservationRepository;
    type Reviews = DieselReviewRepository;
    type Subscriptions = DieselSubscriptionRepository;
    type Payments = DieselPaymentRepository;
    type Images = DieselImageRepository;
    type UpgradeRequests = DieselUpgradeRequestRepository;
}

/// The repositories a registry is assembled from.
pub struct Repositories<S: Storage> {
    pub restaurants: Arc<S::Restaurants>,
    pub sections: Arc<S::Sections>,
    pub tables: Arc<S::Tables>,
    pub menu: Arc<S::Menu>,
    pub reservations: Arc<S::Reservations>,
    pub reviews: Arc<S::Reviews>,
    pub subscriptions: Arc<S::Subscriptions>,
    pub payments: Arc<S::Payments>,
    pub images: Arc<S::Images>,
    pub upgrade_requests: Arc<S::UpgradeRequests>,
}

fn memory_store<E: Entity>(clock: &Arc<dyn Clock>) -> Arc<InMemoryRepository<E>> {
    Arc::new(InMemoryRepository::new(Arc::clone(clock)))
}

impl Repositories<InMemoryStorage> {
    /// Fresh stores; deleting a restaurant cascades to the stores keyed by it.
    pub fn in_memory(clock: &Arc<dyn Clock>) -> Self {
        let sections = memory_store::<Section>(clock);
        let tables = memory_store::<DiningTable>(clock);
        let menu = memory_store::<MenuItem>(clock);
        let reservations = memory_store::<Reservation>(clock);
        let reviews = memory_store::<Review>(clock);
        let images = memory_store::<RestaurantImage>(clock);
        let restaurants = InMemoryRepository::<Restaurant>::new(Arc::clone(clock))
            .cascading_to(&sections)
            .cascading_to(&tables)
            .cascading_to(&menu)
            .cascading_to(&reservations)
            .cascading_to(&reviews)
            .cascading_to(&images);
        Self {
            restaurants: Arc::new(restaurants),
            sections,
            tables,
            menu,
            reservations,
            reviews,
            subscriptions: memory_store(clock),
            payments: memory_store(clock),
            images,
            upgrade_requests: memory_store(clock),
        }
    }
}

impl Repositories<PostgresStorage> {
    pub fn postgres(pool: &DbPool, clock: &Arc<dyn Clock>) -> Self {
        Self {
            restaurants: Arc::new(DieselRestaurantRepository::new(pool.clone(), Arc::clone(clock))),
            sections: Arc::new(DieselSectionRepository::new(pool.clone(), Arc::clone(clock))),
            tables: Arc::new(DieselTableRepository::new(pool.clone(), Arc::clone(clock))),
            menu: Arc::new(DieselMenuRepository::new(pool.clone(), Arc::clone(clock))),
            reservations: Arc::new(DieselReservationRepository::new(pool.clone(), Arc::clone(clock))),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone(), Arc::clone(clock))),
            subscriptions: Arc::new(DieselSubscriptionRepository::new(
                pool.clone(),
                Arc::clone(clock),
            )),
            payments: Arc::new(DieselPaymentRepository::new(pool.clone(), Arc::clone(clock))),
            images: Arc::new(DieselImageRepository::new(pool.clone(), Arc::clone(clock))),
            upgrade_requests: Arc::new(DieselUpgradeRequestRepository::new(
                pool.clone(),
                Arc::clone(clock),
            )),
        }
    }
}

/// Every application service, wired over one storage.
pub struct ServiceRegistry<S: Storage> {
    pub restaurants: RestaurantService<S::Restaurants, S::Reservations>,
    pub sections: SectionService<S::Restaurants, S::Sections, S::Tables>,
    pub tables: TableService<S::Restaurants, S::Sections, S::Tables, S::Reservations>,
    pub menu: MenuService<S::Restaurants, S::Menu>,
    pub reservations: ReservationService<S::Restaurants, S::Tables, S::Reservations>,
    pub reviews: ReviewService<S::Restaurants, S::Reviews>,
    pub subscriptions: SubscriptionService<S::Subscriptions>,
    pub payments: PaymentService<S::Payments, S::Reservations, S::Subscriptions>,
    pub images: ImageService<S::Restaurants, S::Images>,
    pub upgrades: UpgradeService<S::UpgradeRequests, dyn RolePromotion>,
}

impl<S: Storage> Clone for ServiceRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            restaurants: self.restaurants.clone(),
            sections: self.sections.clone(),
            tables: self.tables.clone(),
            menu: self.menu.clone(),
            reservations: self.reservations.clone(),
            reviews: self.reviews.clone(),
            subscriptions: self.subscriptions.clone(),
            payments: self.payments.clone(),
            images: self.images.clone(),
            upgrades: self.upgrades.clone(),
        }
    }
}

impl<S: Storage> ServiceRegistry<S> {
    /// Wire every service over `repos`.
    pub fn assemble(
        repos: Repositories<S>,
        promotion: Arc<dyn RolePromotion>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let Repositories {
            restaurants,
            sections,
            tables,
            menu,
            reservations,
            reviews,
            subscriptions,
            payments,
            images,
            upgrade_requests,
        } = repos;

        Self {
            restaurants: RestaurantService::new(
                Arc::clone(&restaurants),
                Arc::clone(&reservations),
            ),
            sections: SectionService::new(
                Arc::clone(&restaurants),
                Arc::clone(&sections),
                Arc::clone(&tables),
            ),
            tables: TableService::new(
                Arc::clone(&restaurants),
                Arc::clone(&sections),
                Arc::clone(&tables),
                Arc::clone(&reservations),
            ),
            menu: MenuService::new(Arc::clone(&restaurants), menu),
            reservations: ReservationService::new(
                Arc::clone(&restaurants),
                Arc::clone(&tables),
                Arc::clone(&reservations),
                Arc::clone(&clock),
            ),
            reviews: ReviewService::new(Arc::clone(&restaurants), reviews),
            subscriptions: SubscriptionService::new(Arc::clone(&subscriptions), Arc::clone(&clock)),
            payments: PaymentService::new(payments, reservations, subscriptions),
            images: ImageService::new(restaurants, images),
            upgrades: UpgradeService::new(upgrade_requests, promotion, clock),
        }
    }
}

impl ServiceRegistry<InMemoryStorage> {
    /// Services over fresh in-memory repositories.
    ///
    /// Role promotion is accepted without an identity provider.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let repos = Repositories::in_memory(&clock);
        Self::assemble(repos, Arc::new(FixtureRolePromotion), clock)
    }
}

impl ServiceRegistry<PostgresStorage> {
    /// Services over the Diesel repositories sharing `pool`.
    pub fn postgres(pool: &DbPool, clock: Arc<dyn Clock>) -> Self {
        let repos = Repositories::postgres(pool, &clock);
        Self::assemble(repos, Arc::new(FixtureRolePromotion), clock)
    }
}
