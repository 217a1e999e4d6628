use thiserror::Error;

use crate::models::Category;

/// Errors that can occur while loading, editing or querying a tree inventory.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    /// The first non-empty line of a stand file is not a valid area.
    #[error("Malformed header: cannot read stand area from '{0}'")]
    MalformedHeader(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("No data: the {0} inventory is empty")]
    EmptyInventory(Category),

    #[error("Tree not found: {0}")]
    NotFound(String),

    #[error("Enter a species to search for")]
    NoQuery,

    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    #[error("Unknown sort criterion: '{0}'")]
    UnknownCriterion(String),

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),
}

impl From<toml::de::Error> for InventoryError {
    fn from(e: toml::de::Error) -> Self {
        InventoryError::Config(e.to_string())
    }
}
