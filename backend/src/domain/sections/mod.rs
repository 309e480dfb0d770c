//! Restaurant floor sections.

mod model;
mod service;

use serde_json::json;

use crate::domain::{Error, SectionId};

pub use model::{DESCRIPTION_MAX, NAME_MAX, NewSection, Section, SectionChanges};
pub use service::SectionService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("section {0} was not found")]
    NotFound(SectionId),
    #[error("a section named {name:?} already exists in this restaurant")]
    DuplicateName { name: String, existing: SectionId },
    #[error("section {id} still holds {tables} tables")]
    NotEmpty { id: SectionId, tables: u64 },
}

impl From<SectionError> for Error {
    fn from(value: SectionError) -> Self {
        let message = value.to_string();
        match value {
            SectionError::NotFound(id) => Error::not_found(message)
                .with_details(json!({ "code": "section_not_found", "sectionId": id })),
            SectionError::DuplicateName { name, existing } => {
                Error::conflict(message).with_details(json!({
                    "code": "duplicate_section_name",
                    "name": name,
                    "sectionId": existing,
                }))
            }
            SectionError::NotEmpty { id, tables } => Error::conflict(message).with_details(json!({
                "code": "section_not_empty",
                "sectionId": id,
                "tables": tables,
            })),
        }
    }
}

#[cfg(test)]
mod tests;
