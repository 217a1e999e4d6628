use crate::error::InventoryError;
use crate::models::{Inventory, Tree, TreeId};

/// Find the first tree whose species equals `query`, ignoring case.
///
/// Comparison is ordinal (per-character case folding, no locale rules). A
/// blank query is a usage error, distinct from finding nothing.
///
/// # Examples
///
/// ```
/// use tree_inventory::analysis::find;
/// use tree_inventory::io::parse_stand;
/// use tree_inventory::models::{Category, Inventory};
///
/// let stand = parse_stand("1\nPine 20 30 50 coniferous").unwrap();
/// let mut inv = Inventory::new(Category::Coniferous);
/// inv.replace_all(stand.trees, stand.area);
///
/// let (_, tree) = find(&inv, "PINE").unwrap();
/// assert_eq!(tree.species, "Pine");
/// ```
pub fn find<'a>(inventory: &'a Inventory, query: &str) -> Result<(TreeId, &'a Tree), InventoryError> {
    if query.trim().is_empty() {
        return Err(InventoryError::NoQuery);
    }
    inventory
        .iter()
        .find(|(_, tree)| equals_ignore_case(&tree.species, query))
        .ok_or_else(|| InventoryError::NotFound(query.to_string()))
}

fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
