//! Dining tables that reservations are made against.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, RestaurantId, SectionId, TableId};

pub use model::{
    DiningTable, LABEL_MAX, MAX_CAPACITY, MIN_CAPACITY, NewTable, TableChanges,
};
pub use service::TableService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table {0} was not found")]
    NotFound(TableId),
    #[error("a table labelled {label:?} already exists in this restaurant")]
    DuplicateLabel { label: String, existing: TableId },
    #[error("section {section_id} does not belong to restaurant {restaurant_id}")]
    ForeignSection {
        section_id: SectionId,
        restaurant_id: RestaurantId,
    },
    #[error("table {id} still holds {reservations} pending or confirmed reservations")]
    Booked { id: TableId, reservations: u64 },
}

impl From<TableError> for Error {
    fn from(value: TableError) -> Self {
        let message = value.to_string();
        match value {
            TableError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "table_not_found", "tableId": id })),
            TableError::DuplicateLabel { label, existing } => {
                Error::conflict(message).with_details(json!({
                    "code": "duplicate_table_label",
                    "label": label,
                    "tableId": existing,
                }))
            }
            TableError::ForeignSection {
                section_id,
                restaurant_id,
            } => Error::invalid_request(message).with_details(json!({
                "code": "foreign_section",
                "sectionId": section_id,
                "restaurantId": restaurant_id,
            })),
            TableError::Booked { id, reservations } => Error::conflict(message).with_details(json!({
                "code": "table_booked",
                "tableId": id,
                "reservations": reservations,
            })),
        }
    }
}

#[cfg(test)]
mod tests;
