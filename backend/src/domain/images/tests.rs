use std::sync::Arc;

use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::restaurants::Restaurant;
use crate::domain::{Actor, ErrorCode, UserId};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::{fixture_clock, seed_restaurant};

struct Harness {
    owner: Actor,
    restaurant: Restaurant,
    service: ImageService<InMemoryRepository<Restaurant>, InMemoryRepository<RestaurantImage>>,
}

#[fixture]
async fn harness() -> Harness {
    let clock = fixture_clock();
    let restaurants = Arc::new(InMemoryRepository::new(clock.clone()));
    let owner = Actor::owner(UserId::random());
    let restaurant = seed_restaurant(&restaurants, owner.user_id).await;
    Harness {
        owner,
        restaurant,
        service: ImageService::new(restaurants, Arc::new(InMemoryRepository::new(clock))),
    }
}

fn photo(restaurant: &Restaurant, name: &str, primary: bool) -> AttachImage {
    AttachImage {
        restaurant_id: restaurant.id,
        url: format!("https://cdn.example.com/{name}.jpg"),
        alt_text: Some(format!("{name} dining room")),
        is_primary: primary,
    }
}

#[rstest]
#[case("https://cdn.example.com/a.jpg", true)]
#[case("http://cdn.example.com/a.jpg", true)]
#[case("/relative/a.jpg", false)]
#[case("data:image/png;base64,AAAA", false)]
fn only_absolute_web_urls_are_accepted(#[case] raw: &str, #[case] valid: bool) {
    use crate::domain::validation::Validate;

    let request = AttachImage {
        restaurant_id: crate::domain::RestaurantId::random(),
        url: raw.to_owned(),
        alt_text: None,
        is_primary: false,
    };
    assert_eq!(request.validate().is_ok(), valid);
}

#[rstest]
#[tokio::test]
async fn attaching_a_primary_demotes_the_previous_one(#[future] harness: Harness) {
    let h = harness.await;
    let first = h
        .service
        .attach(&h.owner, photo(&h.restaurant, "front", true))
        .await
        .expect("first");
    let second = h
        .service
        .attach(&h.owner, photo(&h.restaurant, "terrace", true))
        .await
        .expect("second");

    let listed = h
        .service
        .list_for_restaurant(h.restaurant.id, &PageRequest::new(1, 10).expect("page"))
        .await
        .expect("list");
    let primaries: Vec<_> = listed
        .results
        .iter()
        .filter(|image| image.is_primary)
        .map(|image| image.id)
        .collect();
    assert_eq!(primaries, vec![second.id]);
    assert!(listed.results.iter().any(|image| image.id == first.id));
}

#[rstest]
#[tokio::test]
async fn promoting_an_existing_image_keeps_a_single_primary(#[future] harness: Harness) {
    let h = harness.await;
    h.service
        .attach(&h.owner, photo(&h.restaurant, "front", true))
        .await
        .expect("front");
    let kitchen = h
        .service
        .attach(&h.owner, photo(&h.restaurant, "kitchen", false))
        .await
        .expect("kitchen");

    let promoted = h
        .service
        .update(
            &h.owner,
            kitchen.id,
            ImageUpdate {
                is_primary: Some(true),
                alt_text: Some(None),
                ..ImageUpdate::default()
            },
        )
        .await
        .expect("promote");
    assert!(promoted.is_primary);
    assert_eq!(promoted.alt_text, None);

    let listed = h
        .service
        .list_for_restaurant(h.restaurant.id, &PageRequest::new(1, 10).expect("page"))
        .await
        .expect("list");
    assert_eq!(listed.results.iter().filter(|image| image.is_primary).count(), 1);
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_manage_images(#[future] harness: Harness) {
    let h = harness.await;
    let stranger = Actor::owner(UserId::random());
    let error = h
        .service
        .attach(&stranger, photo(&h.restaurant, "front", false))
        .await
        .expect_err("stranger attach");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    let image = h
        .service
        .attach(&h.owner, photo(&h.restaurant, "front", false))
        .await
        .expect("attach");
    let error = h
        .service
        .remove(&stranger, image.id)
        .await
        .expect_err("stranger remove");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    h.service.remove(&h.owner, image.id).await.expect("remove");
    let error = h
        .service
        .remove(&h.owner, image.id)
        .await
        .expect_err("gone");
    assert_eq!(error.code(), ErrorCode::NotFound);
}
