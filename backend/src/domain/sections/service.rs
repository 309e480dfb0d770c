//! Section use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::{debug, info};

use crate::domain::ports::{
    Patch, RestaurantRepository, SectionRepository, TableRepository, repository_failure,
};
use crate::domain::restaurants::access::{load_managed_restaurant, load_restaurant};
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, RestaurantId, SectionId};

use super::{NewSection, Section, SectionChanges, SectionError};

pub struct SectionService<R, S, T> {
    restaurants: Arc<R>,
    sections: Arc<S>,
    tables: Arc<T>,
}

impl<R, S, T> Clone for SectionService<R, S, T> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            sections: Arc::clone(&self.sections),
            tables: Arc::clone(&self.tables),
        }
    }
}

impl<R, S, T> SectionService<R, S, T>
where
    R: RestaurantRepository,
    S: SectionRepository,
    T: TableRepository,
{
    pub fn new(restaurants: Arc<R>, sections: Arc<S>, tables: Arc<T>) -> Self {
        Self {
            restaurants,
            sections,
            tables,
        }
    }

    pub async fn create(&self, actor: &Actor, section: NewSection) -> Result<Section, Error> {
        section.validate()?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, section.restaurant_id).await?;
        self.ensure_name_free(section.restaurant_id, &section.name, None)
            .await?;

        let created = self
            .sections
            .create(section)
            .await
            .map_err(repository_failure("create section"))?;
        info!(section_id = %created.id, restaurant_id = %created.restaurant_id, "section created");
        Ok(created)
    }

    pub async fn get(&self, id: SectionId) -> Result<Section, Error> {
        self.load(id).await
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: SectionId,
        changes: SectionChanges,
    ) -> Result<Section, Error> {
        changes.validate()?;
        let section = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, section.restaurant_id).await?;
        if let Some(name) = &changes.name {
            self.ensure_name_free(section.restaurant_id, name, Some(id))
                .await?;
        }

        self.sections
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update section"))?
            .ok_or_else(|| SectionError::NotFound(id).into())
    }

    /// Remove an empty section; sections still holding tables are kept.
    pub async fn delete(&self, actor: &Actor, id: SectionId) -> Result<(), Error> {
        let section = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, section.restaurant_id).await?;

        let tables = self
            .tables
            .count_by_section(&id)
            .await
            .map_err(repository_failure("count section tables"))?;
        if tables > 0 {
            return Err(SectionError::NotEmpty { id, tables }.into());
        }

        if !self
            .sections
            .delete(&id)
            .await
            .map_err(repository_failure("delete section"))?
        {
            return Err(SectionError::NotFound(id).into());
        }
        info!(section_id = %id, "section deleted");
        Ok(())
    }

    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
        page: &PageRequest,
    ) -> Result<Paginated<Section>, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let slice = self
            .sections
            .find_page_by_restaurant(&restaurant_id, page)
            .await
            .map_err(repository_failure("list sections"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn load(&self, id: SectionId) -> Result<Section, Error> {
        self.sections
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load section"))?
            .ok_or_else(|| SectionError::NotFound(id).into())
    }

    async fn ensure_name_free(
        &self,
        restaurant_id: RestaurantId,
        name: &str,
        except: Option<SectionId>,
    ) -> Result<(), Error> {
        let existing = self
            .sections
            .find_by_name(&restaurant_id, name.trim())
            .await
            .map_err(repository_failure("check section name"))?;
        match existing {
            Some(section) if Some(section.id) != except => {
                debug!(%restaurant_id, name, "duplicate section name rejected");
                Err(SectionError::DuplicateName {
                    name: name.trim().to_owned(),
                    existing: section.id,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}
