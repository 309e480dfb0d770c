//! Table layout rules.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{Patch, Repository};
use crate::domain::reservations::{
    NewReservation, Reservation, ReservationChanges, ReservationStatus,
};
use crate::domain::restaurants::Restaurant;
use crate::domain::sections::{NewSection, Section};
use crate::domain::{Actor, ErrorCode, UserId};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::{at, fixture_clock, seed_restaurant};

type Service = TableService<
    InMemoryRepository<Restaurant>,
    InMemoryRepository<Section>,
    InMemoryRepository<DiningTable>,
    InMemoryRepository<Reservation>,
>;

struct Harness {
    owner: Actor,
    restaurant: Restaurant,
    other_restaurant: Restaurant,
    sections: Arc<InMemoryRepository<Section>>,
    reservations: Arc<InMemoryRepository<Reservation>>,
    service: Service,
}

#[fixture]
async fn harness() -> Harness {
    let clock = fixture_clock();
    let restaurants = Arc::new(InMemoryRepository::new(clock.clone()));
    let sections = Arc::new(InMemoryRepository::new(clock.clone()));
    let reservations = Arc::new(InMemoryRepository::new(clock.clone()));
    let owner = Actor::owner(UserId::random());
    let restaurant = seed_restaurant(&restaurants, owner.user_id).await;
    let other_restaurant = seed_restaurant(&restaurants, UserId::random()).await;
    let service = TableService::new(
        restaurants,
        Arc::clone(&sections),
        Arc::new(InMemoryRepository::new(clock)),
        Arc::clone(&reservations),
    );
    Harness {
        owner,
        restaurant,
        other_restaurant,
        sections,
        reservations,
        service,
    }
}

fn table(restaurant: &Restaurant, label: &str, capacity: u16) -> NewTable {
    NewTable {
        restaurant_id: restaurant.id,
        section_id: None,
        label: label.to_owned(),
        capacity,
        is_active: true,
    }
}

#[rstest]
#[case(0, false)]
#[case(1, true)]
#[case(50, true)]
#[case(51, false)]
fn capacity_bounds(#[case] capacity: u16, #[case] valid: bool) {
    use crate::domain::validation::Validate;

    let draft = NewTable {
        restaurant_id: crate::domain::RestaurantId::random(),
        section_id: None,
        label: "T1".to_owned(),
        capacity,
        is_active: true,
    };
    assert_eq!(draft.validate().is_ok(), valid);
}

#[rstest]
#[tokio::test]
async fn labels_are_unique_per_restaurant(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .create(&h.owner, table(&h.restaurant, "T1", 4))
        .await
        .expect("create");

    let error = h
        .service
        .create(&h.owner, table(&h.restaurant, "t1", 2))
        .await
        .expect_err("duplicate label");
    assert_eq!(error.code(), ErrorCode::Conflict);

    let admin = Actor::admin(UserId::random());
    h.service
        .create(&admin, table(&h.other_restaurant, "T1", 2))
        .await
        .expect("same label elsewhere");
}

#[rstest]
#[tokio::test]
async fn sections_must_belong_to_the_same_restaurant(#[future] harness: Harness) {
    let h = harness.await;
    let foreign = h
        .sections
        .create(NewSection {
            restaurant_id: h.other_restaurant.id,
            name: "Patio".to_owned(),
            description: None,
        })
        .await
        .expect("section");

    let mut draft = table(&h.restaurant, "T1", 4);
    draft.section_id = Some(foreign.id);
    let error = h
        .service
        .create(&h.owner, draft)
        .await
        .expect_err("foreign section");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details().expect("details")["code"], "foreign_section");
}

#[rstest]
#[tokio::test]
async fn tables_move_between_sections_and_out_of_them(#[future] harness: Harness) {
    let h = harness.await;
    let bar = h
        .sections
        .create(NewSection {
            restaurant_id: h.restaurant.id,
            name: "Bar".to_owned(),
            description: None,
        })
        .await
        .expect("section");
    let created = h
        .service
        .create(&h.owner, table(&h.restaurant, "T1", 4))
        .await
        .expect("create");

    let moved = h
        .service
        .update(
            &h.owner,
            created.id,
            TableChanges {
                section_id: Some(Some(bar.id)),
                ..TableChanges::default()
            },
        )
        .await
        .expect("move");
    assert_eq!(moved.section_id, Some(bar.id));

    let detached = h
        .service
        .update(
            &h.owner,
            created.id,
            TableChanges {
                section_id: Some(None),
                is_active: Some(false),
                ..TableChanges::default()
            },
        )
        .await
        .expect("detach");
    assert_eq!(detached.section_id, None);
    assert!(!detached.is_active);
}

#[rstest]
#[tokio::test]
async fn missing_tables_are_not_found(#[future] harness: Harness) {
    let h = harness.await;
    let error = h
        .service
        .get(crate::domain::TableId::random())
        .await
        .expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn booked_tables_are_kept_until_their_bookings_end(#[future] harness: Harness) {
    let h = harness.await;
    let created = h
        .service
        .create(&h.owner, table(&h.restaurant, "T1", 4))
        .await
        .expect("create");
    let booking = h
        .reservations
        .create(NewReservation {
            restaurant_id: h.restaurant.id,
            table_id: created.id,
            customer_id: UserId::random(),
            party_size: 2,
            starts_at: at(1, 19, 0),
            ends_at: at(1, 21, 0),
            notes: None,
        })
        .await
        .expect("booking");

    let error = h
        .service
        .delete(&h.owner, created.id)
        .await
        .expect_err("booked table");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details().expect("details")["code"], "table_booked");
    assert_eq!(h.service.get(created.id).await.expect("still there"), created);

    h.reservations
        .update(Patch::new(
            booking.id,
            ReservationChanges::status(ReservationStatus::Cancelled),
        ))
        .await
        .expect("cancel")
        .expect("present");
    h.service
        .delete(&h.owner, created.id)
        .await
        .expect("free table deleted");
    let gone = h.service.get(created.id).await.expect_err("deleted");
    assert_eq!(gone.code(), ErrorCode::NotFound);
}
