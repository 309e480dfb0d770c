//! Process-local repositories.
//!
//! [`InMemoryRepository`] satisfies the generic [`Repository`] port for any
//! [`Entity`] by keeping records in creation order behind a mutex. The server
//! falls back to it when no database is configured, and tests use it as a
//! fully behaving stand-in for the Diesel adapters.
//!
//! A restaurant store wired with [`InMemoryRepository::cascading_to`] removes
//! the records that belong to a deleted restaurant, as the `ON DELETE CASCADE`
//! foreign keys of the PostgreSQL schema do.

mod extensions;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::debug;

use crate::domain::images::RestaurantImage;
use crate::domain::menu::MenuItem;
use crate::domain::ports::{PageSlice, Patch, Repository, RepositoryError};
use crate::domain::reservations::Reservation;
use crate::domain::restaurants::Restaurant;
use crate::domain::reviews::Review;
use crate::domain::sections::Section;
use crate::domain::tables::DiningTable;
use crate::domain::{Entity, RestaurantId};

type Cascade<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Vector-backed repository for one entity type.
pub struct InMemoryRepository<E> {
    records: Mutex<Vec<E>>,
    clock: Arc<dyn Clock>,
    cascades: Vec<Cascade<E>>,
}

/// Records that live and die with one restaurant.
pub trait RestaurantScoped {
    fn restaurant_id(&self) -> RestaurantId;
}

macro_rules! restaurant_scoped {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl RestaurantScoped for $entity {
                fn restaurant_id(&self) -> RestaurantId {
                    self.restaurant_id
                }
            }
        )+
    };
}

restaurant_scoped!(Section, DiningTable, MenuItem, Reservation, Review, RestaurantImage);

impl<E: Entity> InMemoryRepository<E> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            clock,
            cascades: Vec::new(),
        }
    }

    fn records(&self) -> MutexGuard<'_, Vec<E>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every record matching `predicate`, in creation order.
    pub(crate) fn select(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.records()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// The first record matching `predicate`.
    pub(crate) fn find_first(&self, predicate: impl Fn(&E) -> bool) -> Option<E> {
        self.records().iter().find(|record| predicate(record)).cloned()
    }

    /// Drop every record matching `predicate`, returning how many went.
    pub(crate) fn remove_where(&self, predicate: impl Fn(&E) -> bool) -> usize {
        let mut records = self.records();
        let before = records.len();
        records.retain(|record| !predicate(record));
        before - records.len()
    }

    /// The slice of matching records addressed by `page`.
    pub(crate) fn page(&self, predicate: impl Fn(&E) -> bool, page: &PageRequest) -> PageSlice<E> {
        let matching = self.select(predicate);
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        PageSlice {
            items: matching.into_iter().skip(offset).take(limit).collect(),
            total,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository for InMemoryRepository<E> {
    type Entity = E;
    type Id = E::Id;
    type CreateInput = E::Draft;
    type UpdateInput = Patch<E::Id, E::Changes>;

    async fn create(&self, data: E::Draft) -> Result<E, RepositoryError> {
        let entity = E::from_draft(data, self.clock.utc());
        self.records().push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, data: Patch<E::Id, E::Changes>) -> Result<Option<E>, RepositoryError> {
        let now = self.clock.utc();
        let mut records = self.records();
        let Some(record) = records.iter_mut().find(|record| record.id() == data.id) else {
            return Ok(None);
        };
        record.apply(data.changes, now);
        Ok(Some(record.clone()))
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        Ok(self.find_first(|record| record.id() == *id))
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.records().clone())
    }

    async fn delete(&self, id: &E::Id) -> Result<bool, RepositoryError> {
        let removed = {
            let mut records = self.records();
            let Some(index) = records.iter().position(|record| record.id() == *id) else {
                return Ok(false);
            };
            records.remove(index)
        };
        for cascade in &self.cascades {
            cascade(&removed);
        }
        Ok(true)
    }
}

impl InMemoryRepository<Restaurant> {
    /// Delete the matching `children` whenever a restaurant is deleted.
    pub fn cascading_to<C>(mut self, children: &Arc<InMemoryRepository<C>>) -> Self
    where
        C: Entity + RestaurantScoped,
    {
        let children = Arc::clone(children);
        self.cascades.push(Box::new(move |restaurant: &Restaurant| {
            let removed = children.remove_where(|child| child.restaurant_id() == restaurant.id);
            debug!(restaurant_id = %restaurant.id, removed, "cascaded restaurant delete");
        }));
        self
    }
}

#[cfg(test)]
mod tests {
    //! Repository contract checks against the vector store.

    use super::*;
    use crate::domain::ports::RestaurantRepository;
    use crate::domain::restaurants::{NewRestaurant, OpeningHours, RestaurantChanges};
    use crate::domain::tables::NewTable;
    use crate::domain::UserId;
    use crate::test_support::{fixture_clock, hours};
    use rstest::{fixture, rstest};

    type Store = InMemoryRepository<Restaurant>;

    #[fixture]
    fn store() -> Store {
        InMemoryRepository::new(fixture_clock())
    }

    fn draft(name: &str) -> NewRestaurant {
        NewRestaurant {
            owner_id: UserId::random(),
            name: name.to_owned(),
            description: None,
            address: "1 Quay Street".to_owned(),
            phone: None,
            hours: OpeningHours::new(hours(11), hours(23)),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_populates_generated_fields(store: Store) {
        let created = store.create(draft("Brasserie")).await.expect("create");
        assert_eq!(created.created_at, fixture_clock().utc());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.find_by_id(&created.id).await.expect("find"), Some(created));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_id_is_absent_and_inserts_nothing(store: Store) {
        let changes = RestaurantChanges {
            name: Some("Ghost".to_owned()),
            ..RestaurantChanges::default()
        };
        let outcome = store
            .update(Patch::new(RestaurantId::random(), changes))
            .await
            .expect("update");
        assert!(outcome.is_none());
        assert!(store.find_all().await.expect("find all").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_only_supplied_fields(store: Store) {
        let created = store.create(draft("Brasserie")).await.expect("create");
        let changes = RestaurantChanges {
            phone: Some(Some("+47 123".to_owned())),
            ..RestaurantChanges::default()
        };
        let updated = store
            .update(Patch::new(created.id, changes))
            .await
            .expect("update")
            .expect("present");
        assert_eq!(updated.name, "Brasserie");
        assert_eq!(updated.phone.as_deref(), Some("+47 123"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed(store: Store) {
        let created = store.create(draft("Brasserie")).await.expect("create");
        assert!(store.delete(&created.id).await.expect("delete"));
        assert!(!store.delete(&created.id).await.expect("second delete"));
        assert!(!store.delete(&RestaurantId::random()).await.expect("unknown delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn restaurant_deletes_cascade_to_scoped_records() {
        let clock = fixture_clock();
        let tables: Arc<InMemoryRepository<DiningTable>> =
            Arc::new(InMemoryRepository::new(Arc::clone(&clock)));
        let restaurants = InMemoryRepository::<Restaurant>::new(clock).cascading_to(&tables);
        let closing = restaurants.create(draft("Closing")).await.expect("create");
        let staying = restaurants.create(draft("Staying")).await.expect("create");
        for restaurant in [&closing, &staying] {
            tables
                .create(NewTable {
                    restaurant_id: restaurant.id,
                    section_id: None,
                    label: "T1".to_owned(),
                    capacity: 4,
                    is_active: true,
                })
                .await
                .expect("table");
        }

        assert!(restaurants.delete(&closing.id).await.expect("delete"));
        let left: Vec<RestaurantId> = tables
            .find_all()
            .await
            .expect("find all")
            .into_iter()
            .map(|table| table.restaurant_id)
            .collect();
        assert_eq!(left, [staying.id]);

        assert!(!restaurants.delete(&closing.id).await.expect("second delete"));
        assert_eq!(tables.find_all().await.expect("find all").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_keeps_creation_order(store: Store) {
        for name in ["A", "B", "C"] {
            store.create(draft(name)).await.expect("create");
        }
        let names: Vec<String> = store
            .find_all()
            .await
            .expect("find all")
            .into_iter()
            .map(|restaurant| restaurant.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[rstest]
    #[tokio::test]
    async fn pages_slice_in_order(store: Store) {
        for name in ["A", "B", "C", "D", "E"] {
            store.create(draft(name)).await.expect("create");
        }
        let request = PageRequest::new(2, 2).expect("page");
        let slice = store.find_page(&request).await.expect("page");
        assert_eq!(slice.total, 5);
        let names: Vec<&str> = slice.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["C", "D"]);
    }
}
