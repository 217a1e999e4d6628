use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;
use crate::models::{Category, Inventory, Tree};

use super::ParsedStand;

/// Serialized form of one inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandExport {
    pub category: Category,
    /// Stand area in hectares
    pub area: f64,
    pub trees: Vec<Tree>,
}

impl From<&Inventory> for StandExport {
    fn from(inventory: &Inventory) -> Self {
        Self {
            category: inventory.category(),
            area: inventory.area(),
            trees: inventory.trees().cloned().collect(),
        }
    }
}

/// Read a JSON export back as a parsed stand.
///
/// Every tree must satisfy [`Tree::validate`]; one bad record rejects the
/// whole file.
pub fn read_json(path: impl AsRef<Path>) -> Result<ParsedStand, InventoryError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let export: StandExport = serde_json::from_str(&content)?;
    for tree in &export.trees {
        tree.validate()?;
    }
    Ok(ParsedStand {
        area: export.area,
        trees: export.trees,
    })
}

/// Write an inventory to a JSON file.
pub fn write_json(
    inventory: &Inventory,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), InventoryError> {
    let export = StandExport::from(inventory);
    let content = if pretty {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_json::to_string(&export)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
