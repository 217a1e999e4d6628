use std::path::Path;

use crate::error::InventoryError;
use crate::models::Inventory;

/// CSV row structure for tree data.
#[derive(Debug, serde::Serialize)]
struct TreeRow<'a> {
    id: u64,
    species: &'a str,
    height: f64,
    diameter: f64,
    age: i32,
    wood_type: &'a str,
}

const HEADER: [&str; 6] = ["id", "species", "height", "diameter", "age", "wood_type"];

/// Write the trees of an inventory to a CSV file, one row per tree in
/// sequence order. The header row is written even when there are no trees.
pub fn write_csv(inventory: &Inventory, path: impl AsRef<Path>) -> Result<(), InventoryError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    wtr.write_record(HEADER)?;

    for (id, tree) in inventory.iter() {
        wtr.serialize(TreeRow {
            id: id.0,
            species: &tree.species,
            height: tree.height,
            diameter: tree.diameter,
            age: tree.age,
            wood_type: &tree.wood_type,
        })?;
    }

    wtr.flush()?;
    Ok(())
}
