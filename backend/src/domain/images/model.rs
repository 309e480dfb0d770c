//! Restaurant photo metadata. The files themselves live elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entity::{Entity, set_if};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{ImageId, RestaurantId};

pub const ALT_TEXT_MAX: usize = 250;
pub const URL_MAX: usize = 2048;

/// Parse an image location, accepting only absolute `http` and `https` URLs.
///
/// ```
/// use backend::domain::images::parse_image_url;
///
/// assert!(parse_image_url("https://cdn.example.com/a.jpg").is_some());
/// assert!(parse_image_url("ftp://cdn.example.com/a.jpg").is_none());
/// ```
pub fn parse_image_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn check_url(raw: &str, errors: &mut ValidationErrors) {
    if raw.len() > URL_MAX {
        errors.push("url", "too_long", format!("url must be at most {URL_MAX} characters"));
    } else if parse_image_url(raw).is_none() {
        errors.push("url", "invalid_url", "url must be an absolute http or https URL");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantImage {
    pub id: ImageId,
    pub restaurant_id: RestaurantId,
    pub url: Url,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachImage {
    pub restaurant_id: RestaurantId,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl Validate for AttachImage {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_url(&self.url, &mut errors);
        errors.optional_text("altText", self.alt_text.as_deref(), ALT_TEXT_MAX);
        errors.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub restaurant_id: RestaurantId,
    pub url: Url,
    pub alt_text: Option<String>,
    pub is_primary: bool,
}

/// Client payload for editing image metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdate {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<Option<String>>,
    #[serde(default)]
    pub is_primary: Option<bool>,
}

impl Validate for ImageUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(url) = &self.url {
            check_url(url, &mut errors);
        }
        if let Some(alt_text) = &self.alt_text {
            errors.optional_text("altText", alt_text.as_deref(), ALT_TEXT_MAX);
        }
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageChanges {
    pub url: Option<Url>,
    pub alt_text: Option<Option<String>>,
    pub is_primary: Option<bool>,
}

impl Entity for RestaurantImage {
    type Id = ImageId;
    type Draft = NewImage;
    type Changes = ImageChanges;

    fn id(&self) -> ImageId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewImage, now: DateTime<Utc>) -> Self {
        Self {
            id: ImageId::random(),
            restaurant_id: draft.restaurant_id,
            url: draft.url,
            alt_text: draft.alt_text,
            is_primary: draft.is_primary,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ImageChanges, now: DateTime<Utc>) {
        set_if(&mut self.url, changes.url);
        set_if(&mut self.alt_text, changes.alt_text);
        set_if(&mut self.is_primary, changes.is_primary);
        self.updated_at = now;
    }
}
