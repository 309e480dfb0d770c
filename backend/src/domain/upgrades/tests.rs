//! Upgrade requests with a scripted identity provider.

use std::sync::Arc;

use mockall::predicate::eq;
use pagination::PageRequest;
use rstest::rstest;

use super::*;
use crate::domain::ports::{FixtureRolePromotion, MockRolePromotion, RolePromotionError};
use crate::domain::{Actor, ErrorCode, UserId};
use crate::outbound::memory::InMemoryRepository;
use crate::test_support::{fixed_now, fixture_clock};

type Requests = InMemoryRepository<UpgradeRequest>;

fn service_with<P: crate::domain::ports::RolePromotion>(promotion: P) -> UpgradeService<Requests, P> {
    let clock = fixture_clock();
    UpgradeService::new(
        Arc::new(InMemoryRepository::new(clock.clone())),
        Arc::new(promotion),
        clock,
    )
}

fn submission() -> SubmitUpgrade {
    SubmitUpgrade {
        business_name: "Harbour Kitchen AS".to_owned(),
        message: Some("We opened last spring".to_owned()),
    }
}

#[tokio::test]
async fn owners_do_not_need_upgrading() {
    let service = service_with(FixtureRolePromotion);
    let error = service
        .submit(&Actor::owner(UserId::random()), submission())
        .await
        .expect_err("already owner");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.details().expect("details")["code"], "already_owner");
}

#[tokio::test]
async fn one_pending_request_per_user() {
    let service = service_with(FixtureRolePromotion);
    let customer = Actor::customer(UserId::random());
    let first = service.submit(&customer, submission()).await.expect("submit");
    assert_eq!(first.status, UpgradeStatus::Pending);

    let error = service
        .submit(&customer, submission())
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details().expect("details")["code"],
        "upgrade_already_pending"
    );
}

#[tokio::test]
async fn approval_promotes_the_requester() {
    let customer = Actor::customer(UserId::random());
    let mut promotion = MockRolePromotion::new();
    promotion
        .expect_promote_to_owner()
        .with(eq(customer.user_id))
        .times(1)
        .returning(|_| Ok(()));
    let service = service_with(promotion);
    let admin = Actor::admin(UserId::random());

    let request = service.submit(&customer, submission()).await.expect("submit");
    let approved = service.approve(&admin, request.id).await.expect("approve");

    assert_eq!(approved.status, UpgradeStatus::Approved);
    assert_eq!(approved.decided_by, Some(admin.user_id));
    assert_eq!(approved.decided_at, Some(fixed_now()));

    let error = service
        .approve(&admin, request.id)
        .await
        .expect_err("decided once");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn failed_promotion_leaves_the_request_pending() {
    let mut promotion = MockRolePromotion::new();
    promotion
        .expect_promote_to_owner()
        .times(1)
        .returning(|_| Err(RolePromotionError::unavailable("timeout")));
    let service = service_with(promotion);
    let admin = Actor::admin(UserId::random());
    let customer = Actor::customer(UserId::random());

    let request = service.submit(&customer, submission()).await.expect("submit");
    let error = service
        .approve(&admin, request.id)
        .await
        .expect_err("promotion failed");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(
        error.details().expect("details")["code"],
        "role_promotion_failed"
    );

    let reloaded = service.get(&customer, request.id).await.expect("get");
    assert_eq!(reloaded.status, UpgradeStatus::Pending);
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn rejection_needs_a_reason(#[case] reason: &str) {
    let service = service_with(FixtureRolePromotion);
    let customer = Actor::customer(UserId::random());
    let request = service.submit(&customer, submission()).await.expect("submit");

    let error = service
        .reject(&Actor::admin(UserId::random()), request.id, reason.to_owned())
        .await
        .expect_err("blank reason");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn rejection_records_the_reason() {
    let service = service_with(FixtureRolePromotion);
    let customer = Actor::customer(UserId::random());
    let request = service.submit(&customer, submission()).await.expect("submit");

    let rejected = service
        .reject(
            &Actor::admin(UserId::random()),
            request.id,
            " Registration number missing ".to_owned(),
        )
        .await
        .expect("reject");
    assert_eq!(rejected.status, UpgradeStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Registration number missing")
    );

    service
        .submit(&customer, submission())
        .await
        .expect("may apply again after rejection");
}

#[tokio::test]
async fn only_admins_review_requests() {
    let service = service_with(FixtureRolePromotion);
    let customer = Actor::customer(UserId::random());
    let request = service.submit(&customer, submission()).await.expect("submit");
    let page = PageRequest::new(1, 10).expect("page");

    let error = service
        .approve(&customer, request.id)
        .await
        .expect_err("self approval");
    assert_eq!(error.code(), ErrorCode::Forbidden);
    let error = service
        .list(&customer, None, &page)
        .await
        .expect_err("customer list");
    assert_eq!(error.code(), ErrorCode::Forbidden);

    let admin = Actor::admin(UserId::random());
    let pending = service
        .list(&admin, Some(UpgradeStatus::Pending), &page)
        .await
        .expect("pending");
    assert_eq!(pending.total, 1);
    let approved = service
        .list(&admin, Some(UpgradeStatus::Approved), &page)
        .await
        .expect("approved");
    assert_eq!(approved.total, 0);
}

#[tokio::test]
async fn requests_are_private_to_the_requester() {
    let service = service_with(FixtureRolePromotion);
    let request = service
        .submit(&Actor::customer(UserId::random()), submission())
        .await
        .expect("submit");
    let error = service
        .get(&Actor::customer(UserId::random()), request.id)
        .await
        .expect_err("stranger");
    assert_eq!(error.code(), ErrorCode::Forbidden);
}
