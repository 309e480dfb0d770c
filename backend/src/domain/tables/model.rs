//! Dining tables and their seating capacity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{RestaurantId, SectionId, TableId};

pub const LABEL_MAX: usize = 20;
pub const MIN_CAPACITY: u16 = 1;
pub const MAX_CAPACITY: u16 = 50;

/// A bookable table. Labels are unique per restaurant, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: TableId,
    pub restaurant_id: RestaurantId,
    pub section_id: Option<SectionId>,
    pub label: String,
    pub capacity: u16,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiningTable {
    /// Whether the table can be booked for `party_size` guests right now.
    pub fn seats(&self, party_size: u16) -> bool {
        self.is_active && party_size <= self.capacity
    }
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    pub label: String,
    pub capacity: u16,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl Validate for NewTable {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.text("label", &self.label, LABEL_MAX);
        errors.range("capacity", self.capacity, MIN_CAPACITY, MAX_CAPACITY);
        errors.finish()
    }
}

/// Partial table update. `section_id: Some(None)` takes the table out of
/// its section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableChanges {
    pub section_id: Option<Option<SectionId>>,
    pub label: Option<String>,
    pub capacity: Option<u16>,
    pub is_active: Option<bool>,
}

impl Validate for TableChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(label) = &self.label {
            errors.text("label", label, LABEL_MAX);
        }
        if let Some(capacity) = self.capacity {
            errors.range("capacity", capacity, MIN_CAPACITY, MAX_CAPACITY);
        }
        errors.finish()
    }
}

impl Entity for DiningTable {
    type Id = TableId;
    type Draft = NewTable;
    type Changes = TableChanges;

    fn id(&self) -> TableId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewTable, now: DateTime<Utc>) -> Self {
        Self {
            id: TableId::random(),
            restaurant_id: draft.restaurant_id,
            section_id: draft.section_id,
            label: draft.label.trim().to_owned(),
            capacity: draft.capacity,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: TableChanges, now: DateTime<Utc>) {
        set_if(&mut self.section_id, changes.section_id);
        set_if(&mut self.label, changes.label.map(|label| label.trim().to_owned()));
        set_if(&mut self.capacity, changes.capacity);
        set_if(&mut self.is_active, changes.is_active);
        self.updated_at = now;
    }
}
