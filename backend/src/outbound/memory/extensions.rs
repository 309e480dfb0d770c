//! Feature query traits over [`InMemoryRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::images::RestaurantImage;
use crate::domain::menu::MenuItem;
use crate::domain::payments::Payment;
use crate::domain::ports::{
    ImageRepository, MenuRepository, PageSlice, PaymentRepository, RatingTotals, RepositoryError,
    ReservationRepository, RestaurantRepository, ReviewRepository, SectionRepository,
    SubscriptionRepository, TableRepository, UpgradeRequestRepository,
};
use crate::domain::reservations::Reservation;
use crate::domain::restaurants::Restaurant;
use crate::domain::reviews::Review;
use crate::domain::sections::Section;
use crate::domain::subscriptions::{Subscription, SubscriptionStatus};
use crate::domain::tables::DiningTable;
use crate::domain::upgrades::{UpgradeRequest, UpgradeStatus};
use crate::domain::{ReservationId, RestaurantId, SectionId, TableId, UserId};

use super::InMemoryRepository;

fn same_text(stored: &str, wanted: &str) -> bool {
    stored.to_lowercase() == wanted.trim().to_lowercase()
}

#[async_trait]
impl RestaurantRepository for InMemoryRepository<Restaurant> {
    async fn find_page(&self, page: &PageRequest) -> Result<PageSlice<Restaurant>, RepositoryError> {
        Ok(self.page(|_| true, page))
    }

    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Restaurant>, RepositoryError> {
        Ok(self.page(|restaurant| restaurant.owner_id == *owner_id, page))
    }
}

#[async_trait]
impl SectionRepository for InMemoryRepository<Section> {
    async fn find_by_name(
        &self,
        restaurant_id: &RestaurantId,
        name: &str,
    ) -> Result<Option<Section>, RepositoryError> {
        Ok(self.find_first(|section| {
            section.restaurant_id == *restaurant_id && same_text(&section.name, name)
        }))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Section>, RepositoryError> {
        Ok(self.page(|section| section.restaurant_id == *restaurant_id, page))
    }
}

#[async_trait]
impl TableRepository for InMemoryRepository<DiningTable> {
    async fn find_by_label(
        &self,
        restaurant_id: &RestaurantId,
        label: &str,
    ) -> Result<Option<DiningTable>, RepositoryError> {
        Ok(self.find_first(|table| {
            table.restaurant_id == *restaurant_id && same_text(&table.label, label)
        }))
    }

    async fn find_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Vec<DiningTable>, RepositoryError> {
        Ok(self.select(|table| table.restaurant_id == *restaurant_id))
    }

    async fn count_by_section(&self, section_id: &SectionId) -> Result<u64, RepositoryError> {
        let count = self
            .select(|table| table.section_id == Some(*section_id))
            .len();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<DiningTable>, RepositoryError> {
        Ok(self.page(|table| table.restaurant_id == *restaurant_id, page))
    }
}

#[async_trait]
impl MenuRepository for InMemoryRepository<MenuItem> {
    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        available_only: bool,
        page: &PageRequest,
    ) -> Result<PageSlice<MenuItem>, RepositoryError> {
        Ok(self.page(
            |item| item.restaurant_id == *restaurant_id && (item.is_available || !available_only),
            page,
        ))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepository<Reservation> {
    async fn find_overlapping(
        &self,
        table_id: &TableId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        Ok(self.select(|reservation| {
            reservation.table_id == *table_id
                && Some(reservation.id) != exclude
                && reservation.blocks(starts_at, ends_at)
        }))
    }

    async fn find_active_in_window(
        &self,
        restaurant_id: &RestaurantId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        Ok(self.select(|reservation| {
            reservation.restaurant_id == *restaurant_id && reservation.blocks(starts_at, ends_at)
        }))
    }

    async fn count_live_by_table(&self, table_id: &TableId) -> Result<u64, RepositoryError> {
        let count = self
            .select(|reservation| {
                reservation.table_id == *table_id && reservation.status.holds_table()
            })
            .len();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn count_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<u64, RepositoryError> {
        let count = self
            .select(|reservation| reservation.restaurant_id == *restaurant_id)
            .len();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError> {
        Ok(self.page(|reservation| reservation.restaurant_id == *restaurant_id, page))
    }

    async fn find_page_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Reservation>, RepositoryError> {
        Ok(self.page(|reservation| reservation.customer_id == *customer_id, page))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryRepository<Review> {
    async fn find_by_author(
        &self,
        restaurant_id: &RestaurantId,
        author_id: &UserId,
    ) -> Result<Option<Review>, RepositoryError> {
        Ok(self.find_first(|review| {
            review.restaurant_id == *restaurant_id && review.author_id == *author_id
        }))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<Review>, RepositoryError> {
        Ok(self.page(|review| review.restaurant_id == *restaurant_id, page))
    }

    async fn rating_totals(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<RatingTotals, RepositoryError> {
        let reviews = self.select(|review| review.restaurant_id == *restaurant_id);
        Ok(reviews
            .iter()
            .fold(RatingTotals::default(), |totals, review| RatingTotals {
                count: totals.count + 1,
                sum: totals.sum + u64::from(review.rating),
            }))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryRepository<Subscription> {
    async fn find_active_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        Ok(self.select(|subscription| {
            subscription.owner_id == *owner_id && subscription.status == SubscriptionStatus::Active
        }))
    }

    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Subscription>, RepositoryError> {
        Ok(self.page(|subscription| subscription.owner_id == *owner_id, page))
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepository<Payment> {
    async fn find_page_by_payer(
        &self,
        payer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Payment>, RepositoryError> {
        Ok(self.page(|payment| payment.payer_id == *payer_id, page))
    }
}

#[async_trait]
impl ImageRepository for InMemoryRepository<RestaurantImage> {
    async fn find_primary(
        &self,
        restaurant_id: &RestaurantId,
    ) -> Result<Option<RestaurantImage>, RepositoryError> {
        Ok(self.find_first(|image| image.restaurant_id == *restaurant_id && image.is_primary))
    }

    async fn find_page_by_restaurant(
        &self,
        restaurant_id: &RestaurantId,
        page: &PageRequest,
    ) -> Result<PageSlice<RestaurantImage>, RepositoryError> {
        Ok(self.page(|image| image.restaurant_id == *restaurant_id, page))
    }
}

#[async_trait]
impl UpgradeRequestRepository for InMemoryRepository<UpgradeRequest> {
    async fn find_pending_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UpgradeRequest>, RepositoryError> {
        Ok(self.find_first(|request| {
            request.user_id == *user_id && request.status == UpgradeStatus::Pending
        }))
    }

    async fn find_page(
        &self,
        status: Option<UpgradeStatus>,
        page: &PageRequest,
    ) -> Result<PageSlice<UpgradeRequest>, RepositoryError> {
        Ok(self.page(
            |request| status.is_none_or(|wanted| request.status == wanted),
            page,
        ))
    }
}
