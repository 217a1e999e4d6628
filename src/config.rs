use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::SortCriterion;
use crate::error::InventoryError;
use crate::models::Category;

/// Application settings, read from an optional TOML file.
///
/// ```toml
/// coniferous_wood_type = "softwood"
/// deciduous_wood_type = "hardwood"
/// default_sort = "species"
/// precision = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Wood type given to new coniferous trees when none is entered
    pub coniferous_wood_type: String,
    /// Wood type given to new deciduous trees when none is entered
    pub deciduous_wood_type: String,
    /// Criterion used by `sort` when none is named
    pub default_sort: SortCriterion,
    /// Decimal places shown in tables
    pub precision: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            coniferous_wood_type: "coniferous".to_string(),
            deciduous_wood_type: "deciduous".to_string(),
            default_sort: SortCriterion::Height,
            precision: 2,
        }
    }
}

impl AppConfig {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self, InventoryError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&text)
    }

    pub fn default_wood_type(&self, category: Category) -> &str {
        match category {
            Category::Coniferous => &self.coniferous_wood_type,
            Category::Deciduous => &self.deciduous_wood_type,
        }
    }
}
