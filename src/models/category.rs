use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Which of the two stand inventories an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Coniferous,
    Deciduous,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Coniferous, Category::Deciduous];

    /// The other category.
    pub fn toggled(self) -> Self {
        match self {
            Category::Coniferous => Category::Deciduous,
            Category::Deciduous => Category::Coniferous,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Coniferous => write!(f, "coniferous"),
            Category::Deciduous => write!(f, "deciduous"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coniferous" | "conifer" | "c" => Ok(Category::Coniferous),
            "deciduous" | "broadleaf" | "d" => Ok(Category::Deciduous),
            _ => Err(InventoryError::UnknownCategory(s.to_string())),
        }
    }
}
