//! Priced dishes and drinks offered by a restaurant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Entity, set_if};
use crate::domain::text_enum::text_enum;
use crate::domain::validation::{Validate, ValidationErrors};
use crate::domain::{MenuItemId, Money, RestaurantId};

pub const NAME_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 1000;

text_enum! {
    /// Menu section an item is listed under.
    pub enum MenuCategory as "menu category" {
        Starter => "starter",
        Main => "main",
        Dessert => "dessert",
        Drink => "drink",
        Side => "side",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: Money,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub restaurant_id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: MenuCategory,
    pub price: Money,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

impl Validate for NewMenuItem {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.text("name", &self.name, NAME_MAX);
        errors.optional_text("description", self.description.as_deref(), DESCRIPTION_MAX);
        self.price.check_positive("price", &mut errors);
        errors.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<MenuCategory>,
    pub price: Option<Money>,
    pub is_available: Option<bool>,
}

impl Validate for MenuItemChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_changes(*self == Self::default());
        if let Some(name) = &self.name {
            errors.text("name", name, NAME_MAX);
        }
        if let Some(description) = &self.description {
            errors.optional_text("description", description.as_deref(), DESCRIPTION_MAX);
        }
        if let Some(price) = &self.price {
            price.check_positive("price", &mut errors);
        }
        errors.finish()
    }
}

impl Entity for MenuItem {
    type Id = MenuItemId;
    type Draft = NewMenuItem;
    type Changes = MenuItemChanges;

    fn id(&self) -> MenuItemId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(draft: NewMenuItem, now: DateTime<Utc>) -> Self {
        Self {
            id: MenuItemId::random(),
            restaurant_id: draft.restaurant_id,
            name: draft.name.trim().to_owned(),
            description: draft.description,
            category: draft.category,
            price: draft.price,
            is_available: draft.is_available,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: MenuItemChanges, now: DateTime<Utc>) {
        set_if(&mut self.name, changes.name.map(|name| name.trim().to_owned()));
        set_if(&mut self.description, changes.description);
        set_if(&mut self.category, changes.category);
        set_if(&mut self.price, changes.price);
        set_if(&mut self.is_available, changes.is_available);
        self.updated_at = now;
    }
}
