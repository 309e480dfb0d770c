//! Restaurant menus.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, MenuItemId};

pub use model::{DESCRIPTION_MAX, MenuCategory, MenuItem, MenuItemChanges, NAME_MAX, NewMenuItem};
pub use service::MenuService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("menu item {0} was not found")]
    NotFound(MenuItemId),
}

impl From<MenuError> for Error {
    fn from(value: MenuError) -> Self {
        let message = value.to_string();
        match value {
            MenuError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "menu_item_not_found", "menuItemId": id })),
        }
    }
}
