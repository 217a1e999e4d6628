use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::models::{Inventory, Tree};

/// Field an inventory can be sorted by.
///
/// Numeric criteria sort descending, species sorts ascending in ordinal
/// (byte) order. All sorts are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    #[default]
    Height,
    Diameter,
    Species,
    Age,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::Height,
        SortCriterion::Diameter,
        SortCriterion::Species,
        SortCriterion::Age,
    ];

    /// Comparator placing `a` before `b` when it should come first.
    pub fn compare(self, a: &Tree, b: &Tree) -> Ordering {
        match self {
            SortCriterion::Height => b.height.total_cmp(&a.height),
            SortCriterion::Diameter => b.diameter.total_cmp(&a.diameter),
            SortCriterion::Species => a.species.cmp(&b.species),
            SortCriterion::Age => b.age.cmp(&a.age),
        }
    }
}

impl std::fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortCriterion::Height => write!(f, "height"),
            SortCriterion::Diameter => write!(f, "diameter"),
            SortCriterion::Species => write!(f, "species"),
            SortCriterion::Age => write!(f, "age"),
        }
    }
}

impl std::str::FromStr for SortCriterion {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "height" | "h" => Ok(SortCriterion::Height),
            "diameter" | "d" => Ok(SortCriterion::Diameter),
            "species" | "s" => Ok(SortCriterion::Species),
            "age" | "a" => Ok(SortCriterion::Age),
            _ => Err(InventoryError::UnknownCriterion(s.to_string())),
        }
    }
}

/// Reorder an inventory in place.
pub fn sort(inventory: &mut Inventory, criterion: SortCriterion) {
    inventory.sort_by(|a, b| criterion.compare(a, b));
}
