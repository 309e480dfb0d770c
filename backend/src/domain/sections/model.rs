//! Floor sections grouping tables within a restaurant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{RestaurantId, SectionId};

pub const NAME_MAX: usize = 80;
pub const DESCRIPTION_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub restaurant_id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for NewSection {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.text("name", &self.name, NAME_MAX);
        errors.optional_text("description", self.description.as_deref(), DESCRIPTION_MAX);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Validate for SectionChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(name) = &self.name {
            errors.text("name", name, NAME_MAX);
        }
        if let Some(description) = &self.description {
            errors.optional_text("description", description.as_deref(), DESCRIPTION_MAX);
        }
        errors.finish()
    }
}

impl Entity for Section {
    type Id = SectionId;
    type Draft = NewSection;
    type Changes = SectionChanges;

    fn id(&self) -> SectionId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewSection, now: DateTime<Utc>) -> Self {
        Self {
            id: SectionId::random(),
            restaurant_id: draft.restaurant_id,
            name: draft.name.trim().to_owned(),
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: SectionChanges, now: DateTime<Utc>) {
        set_if(&mut self.name, changes.name.map(|name| name.trim().to_owned()));
        set_if(&mut self.description, changes.description);
        self.updated_at = now;
    }
}
