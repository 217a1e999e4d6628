use crate::analysis::{extreme, find, Averages, Measure, StandSummary};
use crate::error::InventoryError;
use crate::models::{Inventory, Tree, TreeId};

/// Unified query API over one inventory.
pub struct Analyzer<'a> {
    inventory: &'a Inventory,
}

impl<'a> Analyzer<'a> {
    /// Create a new Analyzer for the given inventory.
    pub fn new(inventory: &'a Inventory) -> Self {
        Self { inventory }
    }

    /// Count, area, density and mean age.
    pub fn summary(&self) -> StandSummary {
        StandSummary::compute(self.inventory)
    }

    /// Mean height and age; fails on an empty inventory.
    pub fn averages(&self) -> Result<Averages, InventoryError> {
        Averages::compute(self.inventory)
    }

    /// First tallest tree in sequence order.
    pub fn tallest(&self) -> Result<(TreeId, &'a Tree), InventoryError> {
        extreme(self.inventory, Measure::Height)
    }

    /// First thickest tree in sequence order.
    pub fn thickest(&self) -> Result<(TreeId, &'a Tree), InventoryError> {
        extreme(self.inventory, Measure::Diameter)
    }

    /// Case-insensitive species lookup.
    pub fn find(&self, species: &str) -> Result<(TreeId, &'a Tree), InventoryError> {
        find(self.inventory, species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_stand;
    use crate::models::Category;

    fn sample_inventory() -> Inventory {
        let stand = parse_stand(
            "4\nPine 20 30 50 coniferous\nSpruce 25 28 45 coniferous\nFir 18 35 40 coniferous\n",
        )
        .unwrap();
        let mut inv = Inventory::new(Category::Coniferous);
        inv.replace_all(stand.trees, stand.area);
        inv
    }

    #[test]
    fn test_summary_matches_standalone() {
        let inv = sample_inventory();
        assert_eq!(Analyzer::new(&inv).summary(), StandSummary::compute(&inv));
    }

    #[test]
    fn test_tallest_and_thickest() {
        let inv = sample_inventory();
        let analyzer = Analyzer::new(&inv);
        assert_eq!(analyzer.tallest().unwrap().1.species, "Spruce");
        assert_eq!(analyzer.thickest().unwrap().1.species, "Fir");
    }

    #[test]
    fn test_find_delegates() {
        let inv = sample_inventory();
        assert_eq!(Analyzer::new(&inv).find("fir").unwrap().1.species, "Fir");
    }

    #[test]
    fn test_analyzer_empty_inventory() {
        let inv = Inventory::new(Category::Deciduous);
        let analyzer = Analyzer::new(&inv);
        assert_eq!(analyzer.summary().count, 0);
        assert_eq!(analyzer.summary().density, 0.0);
        assert!(analyzer.averages().is_err());
        assert!(analyzer.tallest().is_err());
        assert!(analyzer.thickest().is_err());
    }
}
