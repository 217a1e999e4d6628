use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::InventoryError;
use crate::models::{Inventory, Tree, TreeId};

/// Trees per hectare. Zero when the area is unknown (0) or negative.
///
/// # Examples
///
/// ```
/// use tree_inventory::analysis::density;
///
/// assert_eq!(density(5, 2.0), 2.5);
/// assert_eq!(density(5, 0.0), 0.0);
/// ```
pub fn density(count: usize, area: f64) -> f64 {
    if area > 0.0 {
        count as f64 / area
    } else {
        0.0
    }
}

/// Mean age of all trees, 0 for an empty inventory.
pub fn average_age(inventory: &Inventory) -> f64 {
    if inventory.is_empty() {
        return 0.0;
    }
    inventory.trees().map(|t| f64::from(t.age)).mean()
}

/// Mean height of all trees.
pub fn average_height(inventory: &Inventory) -> Result<f64, InventoryError> {
    if inventory.is_empty() {
        return Err(InventoryError::EmptyInventory(inventory.category()));
    }
    Ok(inventory.trees().map(|t| t.height).mean())
}

/// Measurement a stand extreme is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Height,
    Diameter,
}

impl Measure {
    pub fn of(self, tree: &Tree) -> f64 {
        match self {
            Measure::Height => tree.height,
            Measure::Diameter => tree.diameter,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Measure::Height => "m",
            Measure::Diameter => "cm",
        }
    }
}

/// The first tree maximizing `selector`, in sequence order.
pub fn extreme_by<F>(inventory: &Inventory, selector: F) -> Result<(TreeId, &Tree), InventoryError>
where
    F: Fn(&Tree) -> f64,
{
    let mut best: Option<(TreeId, &Tree, f64)> = None;
    for (id, tree) in inventory.iter() {
        let value = selector(tree);
        match best {
            Some((_, _, top)) if value <= top => {}
            _ => best = Some((id, tree, value)),
        }
    }
    best.map(|(id, tree, _)| (id, tree))
        .ok_or(InventoryError::EmptyInventory(inventory.category()))
}

/// The first tree maximizing a [`Measure`].
pub fn extreme(inventory: &Inventory, measure: Measure) -> Result<(TreeId, &Tree), InventoryError> {
    extreme_by(inventory, |t| measure.of(t))
}

/// Count, area, density and mean age of one inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandSummary {
    pub count: usize,
    /// Hectares
    pub area: f64,
    /// Trees per hectare
    pub density: f64,
    pub average_age: f64,
}

impl StandSummary {
    pub fn compute(inventory: &Inventory) -> Self {
        Self {
            count: inventory.len(),
            area: inventory.area(),
            density: density(inventory.len(), inventory.area()),
            average_age: average_age(inventory),
        }
    }
}

impl std::fmt::Display for StandSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Count: {}. Area: {} ha. Density: {:.2} trees/ha. Average age: {:.2}",
            self.count, self.area, self.density, self.average_age
        )
    }
}

/// Mean height and age, only defined for a non-empty inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Meters
    pub height: f64,
    /// Years
    pub age: f64,
}

impl Averages {
    pub fn compute(inventory: &Inventory) -> Result<Self, InventoryError> {
        Ok(Self {
            height: average_height(inventory)?,
            age: average_age(inventory),
        })
    }
}

impl std::fmt::Display for Averages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Average height: {:.2} m\nAverage age: {:.2} years",
            self.height, self.age
        )
    }
}
