//! PostgreSQL-backed subscription and payment repositories.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::payments::{NewPayment, Payment};
use crate::domain::ports::{
    OrmMapper, PageSlice, PaymentPatch, PaymentRepository, RepositoryError, SubscriptionPatch,
    SubscriptionRepository,
};
use crate::domain::subscriptions::{NewSubscription, Subscription, SubscriptionStatus};
use crate::domain::{PaymentId, SubscriptionId, UserId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::{PaymentMapper, SubscriptionMapper};
use super::models::{PaymentRow, SubscriptionRow};
use super::schema::{payments, subscriptions};

diesel_repository! {
    /// Diesel-backed implementation of the `SubscriptionRepository` port.
    DieselSubscriptionRepository {
        entity: Subscription,
        id: SubscriptionId,
        create: NewSubscription,
        update: SubscriptionPatch,
        row: SubscriptionRow,
        mapper: SubscriptionMapper,
        table: subscriptions,
        label: "subscription",
    }
}

diesel_repository! {
    /// Diesel-backed implementation of the `PaymentRepository` port.
    DieselPaymentRepository {
        entity: Payment,
        id: PaymentId,
        create: NewPayment,
        update: PaymentPatch,
        row: PaymentRow,
        mapper: PaymentMapper,
        table: payments,
        label: "payment",
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn find_active_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::owner_id.eq(*owner_id.as_uuid()))
            .filter(subscriptions::status.eq(SubscriptionStatus::Active.as_str()))
            .order((subscriptions::created_at.asc(), subscriptions::id.asc()))
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find active subscriptions"))?;
        Ok(SubscriptionMapper.to_domain_list(rows)?)
    }

    async fn find_page_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Subscription>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let owner = *owner_id.as_uuid();
        let total: i64 = subscriptions::table
            .filter(subscriptions::owner_id.eq(owner))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count subscriptions"))?;
        let rows: Vec<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::owner_id.eq(owner))
            .order((subscriptions::created_at.asc(), subscriptions::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(SubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list subscriptions"))?;
        Ok(PageSlice {
            items: SubscriptionMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn find_page_by_payer(
        &self,
        payer_id: &UserId,
        page: &PageRequest,
    ) -> Result<PageSlice<Payment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);
        let payer = *payer_id.as_uuid();
        let total: i64 = payments::table
            .filter(payments::payer_id.eq(payer))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count payments"))?;
        let rows: Vec<PaymentRow> = payments::table
            .filter(payments::payer_id.eq(payer))
            .order((payments::created_at.asc(), payments::id.asc()))
            .limit(limit)
            .offset(offset)
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list payments"))?;
        Ok(PageSlice {
            items: PaymentMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}
