//! Generic CRUD over one table.
//!
//! `diesel_repository!` declares a repository struct holding the pool and a
//! clock, and implements the [`Repository`](crate::domain::ports::Repository)
//! port for it. Entities build and update themselves through
//! [`Entity`](crate::domain::Entity); the adapter only moves rows. Updates
//! lock the row, fold the changes in Rust and write the full row back inside
//! one transaction.

macro_rules! diesel_repository {
    (
        $(#[$meta:meta])*
        $name:ident {
            entity: $entity:ty,
            id: $id:ty,
            create: $create:ty,
            update: $update:ty,
            row: $row:ty,
            mapper: $mapper:expr,
            table: $table:ident,
            label: $label:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: $crate::outbound::persistence::DbPool,
            clock: ::std::sync::Arc<dyn ::mockable::Clock>,
        }

        impl $name {
            pub fn new(
                pool: $crate::outbound::persistence::DbPool,
                clock: ::std::sync::Arc<dyn ::mockable::Clock>,
            ) -> Self {
                Self { pool, clock }
            }
        }

        #[::async_trait::async_trait]
        impl $crate::domain::ports::Repository for $name {
            type Entity = $entity;
            type Id = $id;
            type CreateInput = $create;
            type UpdateInput = $update;

            async fn create(
                &self,
                data: $create,
            ) -> Result<$entity, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::ports::OrmMapper as _;

                let entity = <$entity as $crate::domain::Entity>::from_draft(data, self.clock.utc());
                let row = $mapper.to_orm(&entity);
                let mut conn = self.pool.get().await.map_err(super::diesel_helpers::map_pool_error)?;
                let stored = ::diesel::insert_into($table::table)
                    .values(&row)
                    .returning(<$row>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| super::diesel_helpers::map_diesel_error(err, concat!("create ", $label)))?;
                Ok($mapper.to_domain(stored)?)
            }

            async fn update(
                &self,
                data: $update,
            ) -> Result<Option<$entity>, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::AsyncConnection as _;
                use ::diesel_async::RunQueryDsl;
                use ::diesel_async::scoped_futures::ScopedFutureExt as _;
                use $crate::domain::Entity as _;
                use $crate::domain::ports::OrmMapper as _;

                let now = self.clock.utc();
                let key: ::uuid::Uuid = data.id.into();
                let changes = data.changes;
                let mut conn = self.pool.get().await.map_err(super::diesel_helpers::map_pool_error)?;
                conn.transaction::<_, super::diesel_helpers::StoreFailure, _>(|conn| {
                    async move {
                        let Some(current) = $table::table
                            .find(key)
                            .for_update()
                            .select(<$row>::as_select())
                            .first(conn)
                            .await
                            .optional()?
                        else {
                            return Ok(None);
                        };
                        let mut entity = $mapper.to_domain(current)?;
                        entity.apply(changes, now);
                        let row = $mapper.to_orm(&entity);
                        let stored = ::diesel::update($table::table.find(key))
                            .set(&row)
                            .returning(<$row>::as_returning())
                            .get_result(conn)
                            .await?;
                        Ok(Some($mapper.to_domain(stored)?))
                    }
                    .scope_boxed()
                })
                .await
                .map_err(|failure| failure.into_repository(concat!("update ", $label)))
            }

            async fn find_by_id(
                &self,
                id: &$id,
            ) -> Result<Option<$entity>, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::ports::OrmMapper as _;

                let mut conn = self.pool.get().await.map_err(super::diesel_helpers::map_pool_error)?;
                let row = $table::table
                    .find(*id.as_uuid())
                    .select(<$row>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|err| super::diesel_helpers::map_diesel_error(err, concat!("find ", $label)))?;
                Ok(row.map(|row| $mapper.to_domain(row)).transpose()?)
            }

            async fn find_all(&self) -> Result<Vec<$entity>, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;
                use $crate::domain::ports::OrmMapper as _;

                let mut conn = self.pool.get().await.map_err(super::diesel_helpers::map_pool_error)?;
                let rows: Vec<$row> = $table::table
                    .order(($table::created_at.asc(), $table::id.asc()))
                    .select(<$row>::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(|err| super::diesel_helpers::map_diesel_error(err, concat!("list ", $label)))?;
                Ok($mapper.to_domain_list(rows)?)
            }

            async fn delete(&self, id: &$id) -> Result<bool, $crate::domain::ports::RepositoryError> {
                use ::diesel::prelude::*;
                use ::diesel_async::RunQueryDsl;

                let mut conn = self.pool.get().await.map_err(super::diesel_helpers::map_pool_error)?;
                let deleted = ::diesel::delete($table::table.find(*id.as_uuid()))
                    .execute(&mut conn)
                    .await
                    .map_err(|err| super::diesel_helpers::map_diesel_error(err, concat!("delete ", $label)))?;
                Ok(deleted > 0)
            }
        }
    };
}

pub(crate) use diesel_repository;
