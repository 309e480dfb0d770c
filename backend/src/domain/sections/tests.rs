//! Section naming and lifecycle rules.

use std::sync::Arc;

use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::Repository;
use crate::domain::restaurants::Restaurant;
use crate::domain::tables::{DiningTable, NewTable};
use crate::domain::{Actor, ErrorCode, RestaurantId, UserId};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::{fixture_clock, seed_restaurant};

struct Harness {
    owner: Actor,
    restaurant: Restaurant,
    tables: Arc<InMemoryRepository<DiningTable>>,
    service: SectionService<
        InMemoryRepository<Restaurant>,
        InMemoryRepository<Section>,
        InMemoryRepository<DiningTable>,
    >,
}

#[fixture]
async fn harness() -> Harness {
    let clock = fixture_clock();
    let restaurants = Arc::new(InMemoryRepository::new(clock.clone()));
    let tables = Arc::new(InMemoryRepository::new(clock.clone()));
    let owner = Actor::owner(UserId::random());
    let restaurant = seed_restaurant(&restaurants, owner.user_id).await;
    let service = SectionService::new(
        restaurants,
        Arc::new(InMemoryRepository::new(clock)),
        Arc::clone(&tables),
    );
    Harness {
        owner,
        restaurant,
        tables,
        service,
    }
}

fn section(restaurant_id: RestaurantId, name: &str) -> NewSection {
    NewSection {
        restaurant_id,
        name: name.to_owned(),
        description: None,
    }
}

#[rstest]
#[tokio::test]
async fn names_are_unique_per_restaurant_ignoring_case(#[future] harness: Harness) {
    let h = harness.await;
    let terrace = h
        .service
        .create(&h.owner, section(h.restaurant.id, "Terrace"))
        .await
        .expect("create");

    let error = h
        .service
        .create(&h.owner, section(h.restaurant.id, " TERRACE "))
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("details");
    assert_eq!(details["code"], "duplicate_section_name");
    assert_eq!(details["sectionId"], terrace.id.to_string());
}

#[rstest]
#[tokio::test]
async fn renaming_to_own_name_is_allowed(#[future] harness: Harness) {
    let h = harness.await;
    let terrace = h
        .service
        .create(&h.owner, section(h.restaurant.id, "Terrace"))
        .await
        .expect("create");
    let changes = SectionChanges {
        name: Some("terrace".to_owned()),
        ..SectionChanges::default()
    };
    let renamed = h
        .service
        .update(&h.owner, terrace.id, changes)
        .await
        .expect("rename");
    assert_eq!(renamed.name, "terrace");
}

#[rstest]
#[tokio::test]
async fn only_the_owner_manages_sections(#[future] harness: Harness) {
    let h = harness.await;
    let error = h
        .service
        .create(
            &Actor::owner(UserId::random()),
            section(h.restaurant.id, "Terrace"),
        )
        .await
        .expect_err("stranger");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn sections_holding_tables_cannot_be_deleted(#[future] harness: Harness) {
    let h = harness.await;
    let terrace = h
        .service
        .create(&h.owner, section(h.restaurant.id, "Terrace"))
        .await
        .expect("create");
    h.tables
        .create(NewTable {
            restaurant_id: h.restaurant.id,
            section_id: Some(terrace.id),
            label: "T1".to_owned(),
            capacity: 4,
            is_active: true,
        })
        .await
        .expect("table");

    let error = h
        .service
        .delete(&h.owner, terrace.id)
        .await
        .expect_err("not empty");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details().expect("details")["tables"], 1);
}

#[rstest]
#[tokio::test]
async fn listing_requires_an_existing_restaurant(#[future] harness: Harness) {
    let h = harness.await;
    let page = PageRequest::new(1, 10).expect("page");
    let error = h
        .service
        .list_for_restaurant(RestaurantId::random(), &page)
        .await
        .expect_err("unknown restaurant");
    assert_eq!(error.code(), ErrorCode::NotFound);

    h.service
        .create(&h.owner, section(h.restaurant.id, "Bar"))
        .await
        .expect("create");
    let listed = h
        .service
        .list_for_restaurant(h.restaurant.id, &page)
        .await
        .expect("list");
    assert_eq!(listed.total, 1);
}
