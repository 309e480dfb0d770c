//! Table use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{
    Patch, ReservationRepository, RestaurantRepository, SectionRepository, TableRepository,
    repository_failure,
};
use crate::domain::restaurants::access::{load_managed_restaurant, load_restaurant};
use crate::domain::sections::SectionError;
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, RestaurantId, SectionId, TableId};

use super::{DiningTable, NewTable, TableChanges, TableError};

pub struct TableService<R, S, T, V> {
    restaurants: Arc<R>,
    sections: Arc<S>,
    tables: Arc<T>,
    reservations: Arc<V>,
}

impl<R, S, T, V> Clone for TableService<R, S, T, V> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            sections: Arc::clone(&self.sections),
            tables: Arc::clone(&self.tables),
            reservations: Arc::clone(&self.reservations),
        }
    }
}

impl<R, S, T, V> TableService<R, S, T, V>
where
    R: RestaurantRepository,
    S: SectionRepository,
    T: TableRepository,
    V: ReservationRepository,
{
    pub fn new(restaurants: Arc<R>, sections: Arc<S>, tables: Arc<T>, reservations: Arc<V>) -> Self {
        Self {
            restaurants,
            sections,
            tables,
            reservations,
        }
    }

    pub async fn create(&self, actor: &Actor, table: NewTable) -> Result<DiningTable, Error> {
        table.validate()?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, table.restaurant_id).await?;
        if let Some(section_id) = table.section_id {
            self.ensure_section_in(table.restaurant_id, section_id).await?;
        }
        self.ensure_label_free(table.restaurant_id, &table.label, None)
            .await?;

        let created = self
            .tables
            .create(table)
            .await
            .map_err(repository_failure("create table"))?;
        info!(table_id = %created.id, restaurant_id = %created.restaurant_id, "table created");
        Ok(created)
    }

    pub async fn get(&self, id: TableId) -> Result<DiningTable, Error> {
        self.load(id).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: TableId,
        changes: TableChanges,
    ) -> Result<DiningTable, Error> {
        changes.validate()?;
        let table = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, table.restaurant_id).await?;
        if let Some(Some(section_id)) = changes.section_id {
            self.ensure_section_in(table.restaurant_id, section_id).await?;
        }
        if let Some(label) = &changes.label {
            self.ensure_label_free(table.restaurant_id, label, Some(id))
                .await?;
        }

        self.tables
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update table"))?
            .ok_or_else(|| TableError::NotFound(id).into())
    }

    /// Remove a table nobody holds; pending or confirmed bookings keep it.
    pub async fn delete(&self, actor: &Actor, id: TableId) -> Result<(), Error> {
        let table = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, table.restaurant_id).await?;

        let reservations = self
            .reservations
            .count_live_by_table(&id)
            .await
            .map_err(repository_failure("count table reservations"))?;
        if reservations > 0 {
            return Err(TableError::Booked { id, reservations }.into());
        }

        if !self
            .tables
            .delete(&id)
            .await
            .map_err(repository_failure("delete table"))?
        {
            return Err(TableError::NotFound(id).into());
        }
        info!(table_id = %id, "table deleted");
        Ok(())
    }

    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
        page: &PageRequest,
    ) -> Result<Paginated<DiningTable>, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let slice = self
            .tables
            .find_page_by_restaurant(&restaurant_id, page)
            .await
            .map_err(repository_failure("list tables"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn load(&self, id: TableId) -> Result<DiningTable, Error> {
        self.tables
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load table"))?
            .ok_or_else(|| TableError::NotFound(id).into())
    }

    async fn ensure_section_in(
        &self,
        restaurant_id: RestaurantId,
        section_id: SectionId,
    ) -> Result<(), Error> {
        let section = self
            .sections
            .find_by_id(&section_id)
            .await
            .map_err(repository_failure("load section"))?
            .ok_or(SectionError::NotFound(section_id))?;
        if section.restaurant_id != restaurant_id {
            debug!(%section_id, %restaurant_id, "section from another restaurant rejected");
            return Err(TableError::ForeignSection {
                section_id,
                restaurant_id,
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_label_free(
        &self,
        restaurant_id: RestaurantId,
        label: &str,
        except: Option<TableId>,
    ) -> Result<(), Error> {
        let existing = self
            .tables
            .find_by_label(&restaurant_id, label.trim())
            .await
            .map_err(repository_failure("check table label"))?;
        match existing {
            Some(table) if Some(table.id) != except => Err(TableError::DuplicateLabel {
                label: label.trim().to_owned(),
                existing: table.id,
            }
            .into()),
            _ => Ok(()),
        }
    }
}
