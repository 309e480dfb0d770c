//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{
    PageSlice, Repository, RepositoryError, RestaurantPatch, RestaurantRepository,
};
use crate::domain::restaurants::{NewRestaurant, OpeningHours, Restaurant};
use crate::domain::{RestaurantId, UserId};
use crate::outbound::memory::InMemoryRepository;

/// The instant every fixture clock starts at: a Saturday morning.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// A clock that can be moved forward between calls.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// A clock frozen at [`fixed_now`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(MutableClock::new(fixed_now()))
}

pub fn hours(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).expect("valid hour")
}

/// `day_offset` days after [`fixed_now`] at `hour:minute` UTC.
pub fn at(day_offset: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    let date = fixed_now().date_naive() + TimeDelta::days(day_offset);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time");
    date.and_time(time).and_utc()
}

/// Store a restaurant open 11:00-23:00 owned by `owner_id`.
pub async fn seed_restaurant(
    store: &InMemoryRepository<Restaurant>,
    owner_id: UserId,
) -> Restaurant {
    store
        .create(NewRestaurant {
            owner_id,
            name: "Harbour Kitchen".to_owned(),
            description: None,
            address: "1 Quay Street".to_owned(),
            phone: None,
            hours: OpeningHours::new(hours(11), hours(23)),
        })
        .await
        .expect("seed restaurant")
}

mockall::mock! {
    /// Scripted restaurant store for failure paths.
    pub Restaurants {}

    #[async_trait::async_trait]
    impl Repository for Restaurants {
        type Entity = Restaurant;
        type Id = RestaurantId;
        type CreateInput = NewRestaurant;
        type UpdateInput = RestaurantPatch;

        async fn create(&self, data: NewRestaurant) -> Result<Restaurant, RepositoryError>;
        async fn update(&self, data: RestaurantPatch) -> Result<Option<Restaurant>, RepositoryError>;
        async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RepositoryError>;
        async fn find_all(&self) -> Result<Vec<Restaurant>, RepositoryError>;
        async fn delete(&self, id: &RestaurantId) -> Result<bool, RepositoryError>;
    }

    #[async_trait::async_trait]
    impl RestaurantRepository for Restaurants {
        async fn find_page(&self, page: &PageRequest) -> Result<PageSlice<Restaurant>, RepositoryError>;
        async fn find_page_by_owner(
            &self,
            owner_id: &UserId,
            page: &PageRequest,
        ) -> Result<PageSlice<Restaurant>, RepositoryError>;
    }
}
