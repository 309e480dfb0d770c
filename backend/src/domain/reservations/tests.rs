//! Booking flow and lifecycle over in-memory stores.

use std::sync::Arc;

use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::Repository;
use crate::domain::restaurants::Restaurant;
use crate::domain::tables::{DiningTable, NewTable};
use crate::domain::{Actor, ErrorCode, UserId};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::{at, fixture_clock, seed_restaurant};

type Service = ReservationService<
    InMemoryRepository<Restaurant>,
    InMemoryRepository<DiningTable>,
    InMemoryRepository<Reservation>,
>;

struct Harness {
    owner: Actor,
    customer: Actor,
    restaurant: Restaurant,
    small: DiningTable,
    large: DiningTable,
    service: Service,
}

#[fixture]
async fn harness() -> Harness {
    let clock = fixture_clock();
    let restaurants = Arc::new(InMemoryRepository::new(clock.clone()));
    let tables = Arc::new(InMemoryRepository::new(clock.clone()));
    let owner = Actor::owner(UserId::random());
    let restaurant = seed_restaurant(&restaurants, owner.user_id).await;

    let mut seeded = Vec::new();
    for (label, capacity) in [("T6", 6), ("T2", 2)] {
        let table = tables
            .create(NewTable {
                restaurant_id: restaurant.id,
                section_id: None,
                label: label.to_owned(),
                capacity,
                is_active: true,
            })
            .await
            .expect("table");
        seeded.push(table);
    }
    let large = seeded.remove(0);
    let small = seeded.remove(0);

    Harness {
        owner,
        customer: Actor::customer(UserId::random()),
        restaurant,
        small,
        large,
        service: ReservationService::new(
            restaurants,
            tables,
            Arc::new(InMemoryRepository::new(clock.clone())),
            clock,
        ),
    }
}

fn booking(h: &Harness, table: &DiningTable, start: u32, end: u32) -> BookingRequest {
    BookingRequest {
        restaurant_id: h.restaurant.id,
        table_id: table.id,
        party_size: 2,
        starts_at: at(1, start, 0),
        ends_at: at(1, end, 0),
        notes: None,
    }
}

#[rstest]
#[tokio::test]
async fn bookings_start_pending_for_the_customer(#[future] harness: Harness) {
    let h = harness.await;
    let reservation = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.customer_id, h.customer.user_id);
}

#[rstest]
#[tokio::test]
async fn overlapping_bookings_report_the_clash(#[future] harness: Harness) {
    let h = harness.await;
    let first = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");

    let error = h
        .service
        .create(
            &Actor::customer(UserId::random()),
            booking(&h, &h.small, 20, 22),
        )
        .await
        .expect_err("clash");
    assert_eq!(error.code(), ErrorCode::Conflict);
    let details = error.details().expect("details");
    assert_eq!(details["code"], "slot_taken");
    assert_eq!(details["reservationId"], first.id.to_string());
}

#[rstest]
#[tokio::test]
async fn back_to_back_bookings_are_accepted(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("first");
    h.service
        .create(&h.customer, booking(&h, &h.small, 21, 23))
        .await
        .expect("second starts when first ends");
}

#[rstest]
#[tokio::test]
async fn cancelled_bookings_free_the_table(#[future] harness: Harness) {
    let h = harness.await;
    let first = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");
    h.service.cancel(&h.customer, first.id).await.expect("cancel");

    h.service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("rebook");
}

#[rstest]
#[tokio::test]
async fn oversized_parties_are_rejected(#[future] harness: Harness) {
    let h = harness.await;
    let mut request = booking(&h, &h.small, 19, 21);
    request.party_size = 3;
    let error = h
        .service
        .create(&h.customer, request)
        .await
        .expect_err("too many guests");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details().expect("details")["code"], "capacity_exceeded");
}

#[rstest]
#[case(7, 9)]
#[case(22, 23)]
#[tokio::test]
async fn overlong_or_inverted_windows_fail_validation(
    #[future] harness: Harness,
    #[case] start: u32,
    #[case] end: u32,
) {
    let h = harness.await;
    let mut request = booking(&h, &h.small, start, end);
    request.ends_at = if start < 10 {
        request.starts_at + chrono::TimeDelta::hours(9)
    } else {
        request.starts_at - chrono::TimeDelta::hours(1)
    };
    let error = h
        .service
        .create(&h.customer, request)
        .await
        .expect_err("invalid window");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().expect("details")["errors"][0]["field"],
        "endsAt"
    );
}

#[rstest]
#[tokio::test]
async fn lifecycle_follows_allowed_transitions(#[future] harness: Harness) {
    let h = harness.await;
    let reservation = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");

    let error = h
        .service
        .complete(&h.owner, reservation.id)
        .await
        .expect_err("pending cannot complete");
    assert_eq!(error.code(), ErrorCode::Conflict);

    let confirmed = h
        .service
        .confirm(&h.owner, reservation.id)
        .await
        .expect("confirm");
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let completed = h
        .service
        .complete(&h.owner, reservation.id)
        .await
        .expect("complete");
    assert_eq!(completed.status, ReservationStatus::Completed);

    let error = h
        .service
        .cancel(&h.customer, reservation.id)
        .await
        .expect_err("completed cannot cancel");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn customers_cannot_confirm_their_own_booking(#[future] harness: Harness) {
    let h = harness.await;
    let reservation = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");
    let error = h
        .service
        .confirm(&h.customer, reservation.id)
        .await
        .expect_err("customer");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn only_participants_see_a_reservation(#[future] harness: Harness) {
    let h = harness.await;
    let reservation = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");

    h.service.get(&h.customer, reservation.id).await.expect("customer");
    h.service.get(&h.owner, reservation.id).await.expect("owner");
    let error = h
        .service
        .get(&Actor::customer(UserId::random()), reservation.id)
        .await
        .expect_err("stranger");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn rescheduling_ignores_the_reservation_itself(#[future] harness: Harness) {
    let h = harness.await;
    let reservation = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");

    let moved = h
        .service
        .reschedule(
            &h.customer,
            reservation.id,
            RescheduleRequest {
                table_id: None,
                party_size: None,
                starts_at: at(1, 20, 0),
                ends_at: at(1, 22, 0),
            },
        )
        .await
        .expect("overlapping itself is fine");
    assert_eq!(moved.starts_at, at(1, 20, 0));
    assert_eq!(moved.status, ReservationStatus::Pending);
}

#[rstest]
#[tokio::test]
async fn rescheduling_into_another_booking_conflicts(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .create(
            &Actor::customer(UserId::random()),
            booking(&h, &h.large, 19, 21),
        )
        .await
        .expect("other booking");
    let mine = h
        .service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");

    let error = h
        .service
        .reschedule(
            &h.customer,
            mine.id,
            RescheduleRequest {
                table_id: Some(h.large.id),
                party_size: None,
                starts_at: at(1, 20, 0),
                ends_at: at(1, 22, 0),
            },
        )
        .await
        .expect_err("clash on the new table");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn available_tables_skip_booked_and_small_tables(#[future] harness: Harness) {
    let h = harness.await;
    let free = h
        .service
        .available_tables(h.restaurant.id, at(1, 19, 0), at(1, 21, 0), 2)
        .await
        .expect("availability");
    let labels: Vec<&str> = free.iter().map(|table| table.label.as_str()).collect();
    assert_eq!(labels, ["T2", "T6"]);

    h.service
        .create(&h.customer, booking(&h, &h.small, 18, 20))
        .await
        .expect("book");
    let free = h
        .service
        .available_tables(h.restaurant.id, at(1, 19, 0), at(1, 21, 0), 2)
        .await
        .expect("availability");
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, h.large.id);

    let for_four = h
        .service
        .available_tables(h.restaurant.id, at(1, 12, 0), at(1, 14, 0), 4)
        .await
        .expect("availability");
    assert_eq!(for_four.len(), 1);
}

#[rstest]
#[tokio::test]
async fn customers_only_list_their_own_bookings(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .create(&h.customer, booking(&h, &h.small, 19, 21))
        .await
        .expect("book");
    let page = PageRequest::new(1, 10).expect("page");

    let mine = h
        .service
        .list_for_customer(&h.customer, h.customer.user_id, &page)
        .await
        .expect("list");
    assert_eq!(mine.total, 1);

    let error = h
        .service
        .list_for_customer(&Actor::customer(UserId::random()), h.customer.user_id, &page)
        .await
        .expect_err("stranger");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    let restaurant_view = h
        .service
        .list_for_restaurant(&h.owner, h.restaurant.id, &page)
        .await
        .expect("owner list");
    assert_eq!(restaurant_view.total, 1);
}

#[rstest]
fn reschedules_restate_the_window_but_may_omit_table_and_party() {
    let moved: RescheduleRequest = serde_json::from_value(serde_json::json!({
        "startsAt": "2031-03-04T19:00:00Z",
        "endsAt": "2031-03-04T21:00:00Z",
    }))
    .expect("window only");
    assert_eq!(moved.table_id, None);
    assert_eq!(moved.party_size, None);

    let missing_end = serde_json::from_value::<RescheduleRequest>(serde_json::json!({
        "startsAt": "2031-03-04T19:00:00Z",
        "partySize": 2,
    }));
    assert!(missing_end.is_err());
}
