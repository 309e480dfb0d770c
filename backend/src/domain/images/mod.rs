//! Restaurant images.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, ImageId};

pub use model::{
    ALT_TEXT_MAX, AttachImage, ImageChanges, ImageUpdate, NewImage, RestaurantImage, URL_MAX,
    parse_image_url,
};
pub use service::ImageService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("image {0} was not found")]
    NotFound(ImageId),
}

impl From<ImageError> for Error {
    fn from(value: ImageError) -> Self {
        let message = value.to_string();
        match value {
            ImageError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "image_not_found", "imageId": id })),
        }
    }
}

#[cfg(test)]
mod tests;
