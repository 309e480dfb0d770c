//! Row mappers for every stored entity.
//!
//! Text columns holding enumerations go through [`parse_variant`]; bounded
//! integer columns go through [`narrow_within`] with the same limits the
//! domain validates. Nothing is defaulted: a row the domain cannot represent
//! is a [`MappingError`].

use url::Url;

use crate::domain::images::{RestaurantImage, parse_image_url};
use crate::domain::menu::MenuItem;
use crate::domain::payments::{Payment, PaymentTarget};
use crate::domain::ports::{MappingError, OrmMapper, narrow_within, parse_variant};
use crate::domain::reservations::{MAX_PARTY_SIZE, MIN_PARTY_SIZE, Reservation};
use crate::domain::restaurants::{OpeningHours, Restaurant};
use crate::domain::reviews::{MAX_RATING, MIN_RATING, Review};
use crate::domain::sections::Section;
use crate::domain::subscriptions::{MAX_MONTHS, MIN_MONTHS, Subscription};
use crate::domain::tables::{DiningTable, MAX_CAPACITY, MIN_CAPACITY};
use crate::domain::upgrades::UpgradeRequest;
use crate::domain::{CurrencyCode, Money, ReservationId, SubscriptionId, UserId};

use super::models::{
    ImageRow, MenuItemRow, PaymentRow, ReservationRow, RestaurantRow, ReviewRow, SectionRow,
    SubscriptionRow, TableRow, UpgradeRequestRow,
};

fn money(field: &str, amount_minor: i64, currency: String) -> Result<Money, MappingError> {
    let currency =
        CurrencyCode::new(currency).map_err(|error| MappingError::unknown_variant(field, error.0))?;
    Ok(Money::new(amount_minor, currency))
}

fn image_url(raw: &str) -> Result<Url, MappingError> {
    parse_image_url(raw)
        .ok_or_else(|| MappingError::inconsistent(format!("url {raw:?} is not an http(s) URL")))
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RestaurantMapper;

impl OrmMapper for RestaurantMapper {
    type Domain = Restaurant;
    type Orm = RestaurantRow;

    fn to_domain(&self, orm: RestaurantRow) -> Result<Restaurant, MappingError> {
        Ok(Restaurant {
            id: orm.id.into(),
            owner_id: orm.owner_id.into(),
            name: orm.name,
            description: orm.description,
            address: orm.address,
            phone: orm.phone,
            hours: OpeningHours::new(orm.opens_at, orm.closes_at),
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Restaurant) -> RestaurantRow {
        RestaurantRow {
            id: *domain.id.as_uuid(),
            owner_id: *domain.owner_id.as_uuid(),
            name: domain.name.clone(),
            description: domain.description.clone(),
            address: domain.address.clone(),
            phone: domain.phone.clone(),
            opens_at: domain.hours.opens_at,
            closes_at: domain.hours.closes_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SectionMapper;

impl OrmMapper for SectionMapper {
    type Domain = Section;
    type Orm = SectionRow;

    fn to_domain(&self, orm: SectionRow) -> Result<Section, MappingError> {
        Ok(Section {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            name: orm.name,
            description: orm.description,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Section) -> SectionRow {
        SectionRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            name: domain.name.clone(),
            description: domain.description.clone(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TableMapper;

impl OrmMapper for TableMapper {
    type Domain = DiningTable;
    type Orm = TableRow;

    fn to_domain(&self, orm: TableRow) -> Result<DiningTable, MappingError> {
        Ok(DiningTable {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            section_id: orm.section_id.map(Into::into),
            label: orm.label,
            capacity: narrow_within("capacity", orm.capacity, MIN_CAPACITY, MAX_CAPACITY)?,
            is_active: orm.is_active,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &DiningTable) -> TableRow {
        TableRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            section_id: domain.section_id.map(Into::into),
            label: domain.label.clone(),
            capacity: i32::from(domain.capacity),
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MenuItemMapper;

impl OrmMapper for MenuItemMapper {
    type Domain = MenuItem;
    type Orm = MenuItemRow;

    fn to_domain(&self, orm: MenuItemRow) -> Result<MenuItem, MappingError> {
        Ok(MenuItem {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            name: orm.name,
            description: orm.description,
            category: parse_variant("category", &orm.category)?,
            price: money("currency", orm.price_minor, orm.currency)?,
            is_available: orm.is_available,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &MenuItem) -> MenuItemRow {
        MenuItemRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            name: domain.name.clone(),
            description: domain.description.clone(),
            category: domain.category.as_str().to_owned(),
            price_minor: domain.price.amount_minor,
            currency: domain.price.currency.as_str().to_owned(),
            is_available: domain.is_available,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ReservationMapper;

impl OrmMapper for ReservationMapper {
    type Domain = Reservation;
    type Orm = ReservationRow;

    fn to_domain(&self, orm: ReservationRow) -> Result<Reservation, MappingError> {
        if orm.starts_at >= orm.ends_at {
            return Err(MappingError::inconsistent(format!(
                "reservation {} ends before it starts",
                orm.id
            )));
        }
        Ok(Reservation {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            table_id: orm.table_id.into(),
            customer_id: orm.customer_id.into(),
            party_size: narrow_within(
                "party_size",
                orm.party_size,
                MIN_PARTY_SIZE,
                MAX_PARTY_SIZE,
            )?,
            starts_at: orm.starts_at,
            ends_at: orm.ends_at,
            status: parse_variant("status", &orm.status)?,
            notes: orm.notes,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Reservation) -> ReservationRow {
        ReservationRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            table_id: *domain.table_id.as_uuid(),
            customer_id: *domain.customer_id.as_uuid(),
            party_size: i32::from(domain.party_size),
            starts_at: domain.starts_at,
            ends_at: domain.ends_at,
            status: domain.status.as_str().to_owned(),
            notes: domain.notes.clone(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ReviewMapper;

impl OrmMapper for ReviewMapper {
    type Domain = Review;
    type Orm = ReviewRow;

    fn to_domain(&self, orm: ReviewRow) -> Result<Review, MappingError> {
        Ok(Review {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            author_id: orm.author_id.into(),
            rating: narrow_within("rating", orm.rating, MIN_RATING, MAX_RATING)?,
            comment: orm.comment,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Review) -> ReviewRow {
        ReviewRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            author_id: *domain.author_id.as_uuid(),
            rating: i16::from(domain.rating),
            comment: domain.comment.clone(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SubscriptionMapper;

impl OrmMapper for SubscriptionMapper {
    type Domain = Subscription;
    type Orm = SubscriptionRow;

    fn to_domain(&self, orm: SubscriptionRow) -> Result<Subscription, MappingError> {
        Ok(Subscription {
            id: orm.id.into(),
            owner_id: orm.owner_id.into(),
            plan: parse_variant("plan", &orm.plan)?,
            months: narrow_within("months", orm.months, MIN_MONTHS, MAX_MONTHS)?,
            status: parse_variant("status", &orm.status)?,
            starts_at: orm.starts_at,
            expires_at: orm.expires_at,
            cancelled_at: orm.cancelled_at,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Subscription) -> SubscriptionRow {
        SubscriptionRow {
            id: *domain.id.as_uuid(),
            owner_id: *domain.owner_id.as_uuid(),
            plan: domain.plan.as_str().to_owned(),
            months: i16::from(domain.months),
            status: domain.status.as_str().to_owned(),
            starts_at: domain.starts_at,
            expires_at: domain.expires_at,
            cancelled_at: domain.cancelled_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PaymentMapper;

impl OrmMapper for PaymentMapper {
    type Domain = Payment;
    type Orm = PaymentRow;

    fn to_domain(&self, orm: PaymentRow) -> Result<Payment, MappingError> {
        let target = match (orm.reservation_id, orm.subscription_id) {
            (Some(id), None) => PaymentTarget::Reservation(ReservationId::from_uuid(id)),
            (None, Some(id)) => PaymentTarget::Subscription(SubscriptionId::from_uuid(id)),
            _ => {
                return Err(MappingError::inconsistent(format!(
                    "payment {} must reference exactly one target",
                    orm.id
                )));
            }
        };
        Ok(Payment {
            id: orm.id.into(),
            payer_id: UserId::from_uuid(orm.payer_id),
            target,
            amount: money("currency", orm.amount_minor, orm.currency)?,
            method: parse_variant("method", &orm.method)?,
            status: parse_variant("status", &orm.status)?,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &Payment) -> PaymentRow {
        let (reservation_id, subscription_id) = match domain.target {
            PaymentTarget::Reservation(id) => (Some(*id.as_uuid()), None),
            PaymentTarget::Subscription(id) => (None, Some(*id.as_uuid())),
        };
        PaymentRow {
            id: *domain.id.as_uuid(),
            payer_id: *domain.payer_id.as_uuid(),
            reservation_id,
            subscription_id,
            amount_minor: domain.amount.amount_minor,
            currency: domain.amount.currency.as_str().to_owned(),
            method: domain.method.as_str().to_owned(),
            status: domain.status.as_str().to_owned(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ImageMapper;

impl OrmMapper for ImageMapper {
    type Domain = RestaurantImage;
    type Orm = ImageRow;

    fn to_domain(&self, orm: ImageRow) -> Result<RestaurantImage, MappingError> {
        Ok(RestaurantImage {
            id: orm.id.into(),
            restaurant_id: orm.restaurant_id.into(),
            url: image_url(&orm.url)?,
            alt_text: orm.alt_text,
            is_primary: orm.is_primary,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &RestaurantImage) -> ImageRow {
        ImageRow {
            id: *domain.id.as_uuid(),
            restaurant_id: *domain.restaurant_id.as_uuid(),
            url: domain.url.as_str().to_owned(),
            alt_text: domain.alt_text.clone(),
            is_primary: domain.is_primary,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UpgradeRequestMapper;

impl OrmMapper for UpgradeRequestMapper {
    type Domain = UpgradeRequest;
    type Orm = UpgradeRequestRow;

    fn to_domain(&self, orm: UpgradeRequestRow) -> Result<UpgradeRequest, MappingError> {
        Ok(UpgradeRequest {
            id: orm.id.into(),
            user_id: orm.user_id.into(),
            business_name: orm.business_name,
            message: orm.message,
            status: parse_variant("status", &orm.status)?,
            decided_by: orm.decided_by.map(Into::into),
            decided_at: orm.decided_at,
            rejection_reason: orm.rejection_reason,
            created_at: orm.created_at,
            updated_at: orm.updated_at,
        })
    }

    fn to_orm(&self, domain: &UpgradeRequest) -> UpgradeRequestRow {
        UpgradeRequestRow {
            id: *domain.id.as_uuid(),
            user_id: *domain.user_id.as_uuid(),
            business_name: domain.business_name.clone(),
            message: domain.message.clone(),
            status: domain.status.as_str().to_owned(),
            decided_by: domain.decided_by.map(Into::into),
            decided_at: domain.decided_at,
            rejection_reason: domain.rejection_reason.clone(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rstest::rstest;

    use super::*;
    use crate::domain::menu::MenuCategory;
    use crate::domain::payments::{PaymentMethod, PaymentStatus};
    use crate::domain::reservations::ReservationStatus;
    use crate::domain::subscriptions::{SubscriptionPlan, SubscriptionStatus};
    use crate::domain::upgrades::UpgradeStatus;
    use crate::domain::{
        ImageId, MenuItemId, PaymentId, RestaurantId, ReviewId, SectionId, TableId,
        UpgradeRequestId,
    };
    use crate::test_support::{at, fixed_now, hours};

    fn assert_round_trip<M>(mapper: M, value: M::Domain)
    where
        M: OrmMapper,
        M::Domain: PartialEq + std::fmt::Debug,
    {
        let row = mapper.to_orm(&value);
        assert_eq!(mapper.to_domain(row).expect("row maps back"), value);
    }

    fn table(capacity: u16, section_id: Option<SectionId>) -> DiningTable {
        DiningTable {
            id: TableId::random(),
            restaurant_id: RestaurantId::random(),
            section_id,
            label: "T1".to_owned(),
            capacity,
            is_active: true,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::random(),
            restaurant_id: RestaurantId::random(),
            author_id: UserId::random(),
            rating,
            comment: Some("Lovely".to_owned()),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn reservation() -> Reservation {
        Reservation {
            id: ReservationId::random(),
            restaurant_id: RestaurantId::random(),
            table_id: TableId::random(),
            customer_id: UserId::random(),
            party_size: 4,
            starts_at: at(1, 19, 0),
            ends_at: at(1, 21, 0),
            status: ReservationStatus::Confirmed,
            notes: Some("window seat".to_owned()),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    fn payment(target: PaymentTarget) -> Payment {
        Payment {
            id: PaymentId::random(),
            payer_id: UserId::random(),
            target,
            amount: Money::new(12_500, CurrencyCode::new("EUR").expect("currency")),
            method: PaymentMethod::BankTransfer,
            status: PaymentStatus::Completed,
            created_at: fixed_now(),
            updated_at: fixed_now() + TimeDelta::minutes(5),
        }
    }

    #[test]
    fn restaurants_survive_a_round_trip() {
        let restaurant = Restaurant {
            id: RestaurantId::random(),
            owner_id: UserId::random(),
            name: "Harbour Kitchen".to_owned(),
            description: None,
            address: "1 Quay Street".to_owned(),
            phone: Some("+47 22 00 00 00".to_owned()),
            hours: OpeningHours::new(hours(11), hours(23)),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        let row = RestaurantMapper.to_orm(&restaurant);
        assert_eq!(RestaurantMapper.to_domain(row), Ok(restaurant));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Upstairs by the windows"))]
    fn sections_survive_a_round_trip(#[case] description: Option<&str>) {
        assert_round_trip(
            SectionMapper,
            Section {
                id: SectionId::random(),
                restaurant_id: RestaurantId::random(),
                name: "Terrace".to_owned(),
                description: description.map(str::to_owned),
                created_at: fixed_now(),
                updated_at: fixed_now() + TimeDelta::hours(1),
            },
        );
    }

    #[rstest]
    #[case(MIN_CAPACITY, None)]
    #[case(MAX_CAPACITY, Some(SectionId::random()))]
    fn tables_survive_a_round_trip(#[case] capacity: u16, #[case] section: Option<SectionId>) {
        assert_round_trip(TableMapper, table(capacity, section));
    }

    #[rstest]
    #[case(MenuCategory::Starter, true)]
    #[case(MenuCategory::Drink, false)]
    fn menu_items_survive_a_round_trip(#[case] category: MenuCategory, #[case] is_available: bool) {
        assert_round_trip(
            MenuItemMapper,
            MenuItem {
                id: MenuItemId::random(),
                restaurant_id: RestaurantId::random(),
                name: "Moules frites".to_owned(),
                description: None,
                category,
                price: Money::new(2_450, CurrencyCode::new("EUR").expect("currency")),
                is_available,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            },
        );
    }

    #[rstest]
    #[case(ReservationStatus::Pending)]
    #[case(ReservationStatus::Confirmed)]
    #[case(ReservationStatus::Cancelled)]
    #[case(ReservationStatus::Completed)]
    fn reservations_survive_a_round_trip(#[case] status: ReservationStatus) {
        assert_round_trip(
            ReservationMapper,
            Reservation {
                status,
                ..reservation()
            },
        );
    }

    #[rstest]
    #[case(MIN_RATING)]
    #[case(MAX_RATING)]
    fn reviews_survive_a_round_trip(#[case] rating: u8) {
        assert_round_trip(ReviewMapper, review(rating));
    }

    #[rstest]
    #[case(SubscriptionPlan::Basic, SubscriptionStatus::Active, None)]
    #[case(SubscriptionPlan::Enterprise, SubscriptionStatus::Cancelled, Some(at(10, 12, 0)))]
    fn subscriptions_survive_a_round_trip(
        #[case] plan: SubscriptionPlan,
        #[case] status: SubscriptionStatus,
        #[case] cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    ) {
        assert_round_trip(
            SubscriptionMapper,
            Subscription {
                id: SubscriptionId::random(),
                owner_id: UserId::random(),
                plan,
                months: 12,
                status,
                starts_at: fixed_now(),
                expires_at: at(365, 9, 0),
                cancelled_at,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            },
        );
    }

    #[rstest]
    #[case(true, Some("Dining room at dusk"))]
    #[case(false, None)]
    fn images_survive_a_round_trip(#[case] is_primary: bool, #[case] alt_text: Option<&str>) {
        assert_round_trip(
            ImageMapper,
            RestaurantImage {
                id: ImageId::random(),
                restaurant_id: RestaurantId::random(),
                url: parse_image_url("https://img.example.com/room.jpg").expect("url"),
                alt_text: alt_text.map(str::to_owned),
                is_primary,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            },
        );
    }

    #[rstest]
    #[case(UpgradeStatus::Pending, false, None)]
    #[case(UpgradeStatus::Approved, true, None)]
    #[case(UpgradeStatus::Rejected, true, Some("incomplete registration"))]
    fn upgrade_requests_survive_a_round_trip(
        #[case] status: UpgradeStatus,
        #[case] decided: bool,
        #[case] reason: Option<&str>,
    ) {
        assert_round_trip(
            UpgradeRequestMapper,
            UpgradeRequest {
                id: UpgradeRequestId::random(),
                user_id: UserId::random(),
                business_name: "Harbour Kitchen AS".to_owned(),
                message: Some("We open in May".to_owned()),
                status,
                decided_by: decided.then(UserId::random),
                decided_at: decided.then(|| at(2, 10, 0)),
                rejection_reason: reason.map(str::to_owned),
                created_at: fixed_now(),
                updated_at: fixed_now(),
            },
        );
    }

    #[rstest]
    #[case(0)]
    #[case(51)]
    fn capacities_outside_the_domain_range_fail(#[case] capacity: i32) {
        let mut row = TableMapper.to_orm(&table(4, None));
        row.capacity = capacity;
        assert_eq!(
            TableMapper.to_domain(row),
            Err(MappingError::out_of_range("capacity", i64::from(capacity)))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn ratings_outside_the_domain_range_fail(#[case] rating: i16) {
        let mut row = ReviewMapper.to_orm(&review(3));
        row.rating = rating;
        assert_eq!(
            ReviewMapper.to_domain(row),
            Err(MappingError::out_of_range("rating", i64::from(rating)))
        );
    }

    #[test]
    fn reservation_status_is_stored_as_text() {
        let row = ReservationMapper.to_orm(&reservation());
        assert_eq!(row.status, "confirmed");
        assert_eq!(row.party_size, 4);
    }

    #[test]
    fn unknown_reservation_status_fails() {
        let mut row = ReservationMapper.to_orm(&reservation());
        row.status = "no_show".to_owned();
        assert_eq!(
            ReservationMapper.to_domain(row),
            Err(MappingError::unknown_variant("status", "no_show"))
        );
    }

    #[test]
    fn inverted_reservation_windows_fail() {
        let mut row = ReservationMapper.to_orm(&reservation());
        row.ends_at = row.starts_at;
        assert!(matches!(
            ReservationMapper.to_domain(row),
            Err(MappingError::Inconsistent { .. })
        ));
    }

    #[rstest]
    #[case(PaymentTarget::Reservation(ReservationId::random()))]
    #[case(PaymentTarget::Subscription(SubscriptionId::random()))]
    fn payment_targets_use_one_column(#[case] target: PaymentTarget) {
        let original = payment(target);
        let row = PaymentMapper.to_orm(&original);
        assert_eq!(
            usize::from(row.reservation_id.is_some()) + usize::from(row.subscription_id.is_some()),
            1
        );
        assert_eq!(PaymentMapper.to_domain(row), Ok(original));
    }

    #[test]
    fn payments_with_two_targets_fail() {
        let mut row = PaymentMapper.to_orm(&payment(PaymentTarget::Reservation(ReservationId::random())));
        row.subscription_id = Some(uuid::Uuid::new_v4());
        assert!(matches!(
            PaymentMapper.to_domain(row),
            Err(MappingError::Inconsistent { .. })
        ));
    }

    #[test]
    fn lowercase_currency_is_rejected() {
        let mut row = PaymentMapper.to_orm(&payment(PaymentTarget::Reservation(ReservationId::random())));
        row.currency = "eur".to_owned();
        assert_eq!(
            PaymentMapper.to_domain(row),
            Err(MappingError::unknown_variant("currency", "eur"))
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(70_000)]
    fn table_capacity_must_fit(#[case] capacity: i32) {
        let row = TableRow {
            id: uuid::Uuid::new_v4(),
            restaurant_id: uuid::Uuid::new_v4(),
            section_id: None,
            label: "T1".to_owned(),
            capacity,
            is_active: true,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        assert_eq!(
            TableMapper.to_domain(row),
            Err(MappingError::out_of_range("capacity", i64::from(capacity)))
        );
    }

    #[test]
    fn non_web_image_urls_fail() {
        let row = ImageRow {
            id: uuid::Uuid::new_v4(),
            restaurant_id: uuid::Uuid::new_v4(),
            url: "file:///tmp/a.jpg".to_owned(),
            alt_text: None,
            is_primary: false,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        };
        assert!(ImageMapper.to_domain(row).is_err());
    }
}
