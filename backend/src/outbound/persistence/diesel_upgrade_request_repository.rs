//! PostgreSQL-backed `UpgradeRequestRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{
    OrmMapper, PageSlice, RepositoryError, UpgradePatch, UpgradeRequestRepository,
};
use crate::domain::upgrades::{NewUpgradeRequest, UpgradeRequest, UpgradeStatus};
use crate::domain::{UpgradeRequestId, UserId};

use super::diesel_helpers::{count_to_u64, map_diesel_error, map_pool_error, page_window};
use super::diesel_repository::diesel_repository;
use super::mappers::UpgradeRequestMapper;
use super::models::UpgradeRequestRow;
use super::schema::owner_upgrade_requests;

diesel_repository! {
    /// Diesel-backed implementation of the `UpgradeRequestRepository` port.
    DieselUpgradeRequestRepository {
        entity: UpgradeRequest,
        id: UpgradeRequestId,
        create: NewUpgradeRequest,
        update: UpgradePatch,
        row: UpgradeRequestRow,
        mapper: UpgradeRequestMapper,
        table: owner_upgrade_requests,
        label: "upgrade request",
    }
}

#[async_trait]
impl UpgradeRequestRepository for DieselUpgradeRequestRepository {
    async fn find_pending_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UpgradeRequest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = owner_upgrade_requests::table
            .filter(owner_upgrade_requests::user_id.eq(*user_id.as_uuid()))
            .filter(owner_upgrade_requests::status.eq(UpgradeStatus::Pending.as_str()))
            .select(UpgradeRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find pending upgrade request"))?;
        Ok(row.map(|row| UpgradeRequestMapper.to_domain(row)).transpose()?)
    }

    async fn find_page(
        &self,
        status: Option<UpgradeStatus>,
        page: &PageRequest,
    ) -> Result<PageSlice<UpgradeRequest>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = page_window(page);

        let mut count_query = owner_upgrade_requests::table.into_boxed();
        let mut page_query = owner_upgrade_requests::table.into_boxed();
        if let Some(wanted) = status {
            count_query = count_query.filter(owner_upgrade_requests::status.eq(wanted.as_str()));
            page_query = page_query.filter(owner_upgrade_requests::status.eq(wanted.as_str()));
        }

        let total: i64 = count_query
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count upgrade requests"))?;
        let rows: Vec<UpgradeRequestRow> = page_query
            .order((
                owner_upgrade_requests::created_at.asc(),
                owner_upgrade_requests::id.asc(),
            ))
            .limit(limit)
            .offset(offset)
            .select(UpgradeRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list upgrade requests"))?;
        Ok(PageSlice {
            items: UpgradeRequestMapper.to_domain_list(rows)?,
            total: count_to_u64(total),
        })
    }
}
