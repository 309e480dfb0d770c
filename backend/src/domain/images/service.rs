//! Image metadata use cases.

use std::sync::Arc;

use pagination::{PageRequest, Paginated};
use tracing::info;

use crate::domain::ports::{ImageRepository, Patch, RestaurantRepository, repository_failure};
use crate::domain::restaurants::access::{load_managed_restaurant, load_restaurant};
use crate::domain::validation::Validate;
use crate::domain::{Actor, Error, ImageId, RestaurantId};

use super::{
    AttachImage, ImageChanges, ImageError, ImageUpdate, NewImage, RestaurantImage,
    parse_image_url,
};

/// Keeps at most one primary image per restaurant.
pub struct ImageService<R, I> {
    restaurants: Arc<R>,
    images: Arc<I>,
}

impl<R, I> Clone for ImageService<R, I> {
    fn clone(&self) -> Self {
        Self {
            restaurants: Arc::clone(&self.restaurants),
            images: Arc::clone(&self.images),
        }
    }
}

impl<R, I> ImageService<R, I>
where
    R: RestaurantRepository,
    I: ImageRepository,
{
    pub fn new(restaurants: Arc<R>, images: Arc<I>) -> Self {
        Self {
            restaurants,
            images,
        }
    }

    pub async fn attach(&self, actor: &Actor, request: AttachImage) -> Result<RestaurantImage, Error> {
        request.validate()?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, request.restaurant_id).await?;
        let url = parse_image_url(&request.url)
            .ok_or_else(|| Error::invalid_request("url must be an absolute http or https URL"))?;
        if request.is_primary {
            self.clear_primary(request.restaurant_id, None).await?;
        }

        let image = self
            .images
            .create(NewImage {
                restaurant_id: request.restaurant_id,
                url,
                alt_text: request.alt_text,
                is_primary: request.is_primary,
            })
            .await
            .map_err(repository_failure("attach image"))?;
        info!(image_id = %image.id, restaurant_id = %image.restaurant_id, primary = image.is_primary, "image attached");
        Ok(image)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: ImageId,
        request: ImageUpdate,
    ) -> Result<RestaurantImage, Error> {
        request.validate()?;
        let image = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, image.restaurant_id).await?;
        let url = match &request.url {
            Some(raw) => Some(parse_image_url(raw).ok_or_else(|| {
                Error::invalid_request("url must be an absolute http or https URL")
            })?),
            None => None,
        };
        if request.is_primary == Some(true) {
            self.clear_primary(image.restaurant_id, Some(id)).await?;
        }

        let changes = ImageChanges {
            url,
            alt_text: request.alt_text,
            is_primary: request.is_primary,
        };
        self.images
            .update(Patch::new(id, changes))
            .await
            .map_err(repository_failure("update image"))?
            .ok_or_else(|| ImageError::NotFound(id).into())
    }

    pub async fn remove(&self, actor: &Actor, id: ImageId) -> Result<(), Error> {
        let image = self.load(id).await?;
        load_managed_restaurant(self.restaurants.as_ref(), actor, image.restaurant_id).await?;
        if !self
            .images
            .delete(&id)
            .await
            .map_err(repository_failure("remove image"))?
        {
            return Err(ImageError::NotFound(id).into());
        }
        info!(image_id = %id, "image removed");
        Ok(())
    }

    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
        page: &PageRequest,
    ) -> Result<Paginated<RestaurantImage>, Error> {
        load_restaurant(self.restaurants.as_ref(), restaurant_id).await?;
        let slice = self
            .images
            .find_page_by_restaurant(&restaurant_id, page)
            .await
            .map_err(repository_failure("list images"))?;
        Ok(slice.into_paginated(page)?)
    }

    async fn clear_primary(
        &self,
        restaurant_id: RestaurantId,
        keep: Option<ImageId>,
    ) -> Result<(), Error> {
        let current = self
            .images
            .find_primary(&restaurant_id)
            .await
            .map_err(repository_failure("load primary image"))?;
        if let Some(image) = current.filter(|image| Some(image.id) != keep) {
            let changes = ImageChanges {
                is_primary: Some(false),
                ..ImageChanges::default()
            };
            self.images
                .update(Patch::new(image.id, changes))
                .await
                .map_err(repository_failure("clear primary image"))?;
        }
        Ok(())
    }

    async fn load(&self, id: ImageId) -> Result<RestaurantImage, Error> {
        self.images
            .find_by_id(&id)
            .await
            .map_err(repository_failure("load image"))?
            .ok_or_else(|| ImageError::NotFound(id).into())
    }
}
