use std::cmp::Ordering;

use super::{Category, Tree, TreeId};

/// An ordered collection of trees for one category, plus the stand area.
///
/// Order is meaningful: it is the load order or the last applied sort.
#[derive(Debug, Clone)]
pub struct Inventory {
    category: Category,
    /// Stand area in hectares, 0 when unknown
    area: f64,
    records: Vec<(TreeId, Tree)>,
    next_id: u64,
}

impl Inventory {
    /// Create a new empty inventory.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            area: 0.0,
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Stand area in hectares (0 means unknown).
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Number of stored trees.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over `(id, tree)` pairs in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (TreeId, &Tree)> + '_ {
        self.records.iter().map(|(id, tree)| (*id, tree))
    }

    /// Iterate over the trees in sequence order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> + '_ {
        self.records.iter().map(|(_, tree)| tree)
    }

    /// Ids in sequence order.
    pub fn ids(&self) -> Vec<TreeId> {
        self.records.iter().map(|(id, _)| *id).collect()
    }

    pub fn get(&self, id: TreeId) -> Option<&Tree> {
        self.records
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, tree)| tree)
    }

    /// Id of the tree at a zero-based position in the current order.
    pub fn id_at(&self, index: usize) -> Option<TreeId> {
        self.records.get(index).map(|(id, _)| *id)
    }

    /// Append a tree to the end of the sequence. No duplicate check.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree_inventory::models::{Category, Inventory, TreeDraft};
    ///
    /// let mut inv = Inventory::new(Category::Coniferous);
    /// let draft = TreeDraft {
    ///     species: "Pine".into(), height: "20".into(), diameter: "30".into(),
    ///     age: "50".into(), wood_type: None,
    /// };
    /// let id = inv.add(draft.build("coniferous").unwrap());
    /// assert_eq!(inv.len(), 1);
    /// assert_eq!(inv.get(id).unwrap().species, "Pine");
    /// ```
    pub fn add(&mut self, tree: Tree) -> TreeId {
        let id = self.allocate_id();
        self.records.push((id, tree));
        id
    }

    /// Remove the tree with the given identity. No-op when absent.
    pub fn remove(&mut self, id: TreeId) -> Option<Tree> {
        let index = self.records.iter().position(|(candidate, _)| *candidate == id)?;
        Some(self.records.remove(index).1)
    }

    /// Discard every stored tree and the area, replacing them in one step.
    ///
    /// Fresh ids are issued; ids handed out before the call never match again.
    pub fn replace_all(&mut self, trees: Vec<Tree>, area: f64) -> Vec<TreeId> {
        let records: Vec<(TreeId, Tree)> = trees
            .into_iter()
            .map(|tree| (self.allocate_id(), tree))
            .collect();
        let ids = records.iter().map(|(id, _)| *id).collect();
        self.records = records;
        self.area = area;
        ids
    }

    /// Stable in-place reorder by a comparator over trees.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Tree, &Tree) -> Ordering,
    {
        self.records.sort_by(|(_, a), (_, b)| compare(a, b));
    }

    fn allocate_id(&mut self) -> TreeId {
        let id = TreeId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tree(species: &str, height: f64) -> Tree {
        Tree {
            species: species.to_string(),
            height,
            diameter: 20.0,
            age: 40,
            wood_type: "coniferous".to_string(),
        }
    }

    fn sample_inventory() -> Inventory {
        let mut inv = Inventory::new(Category::Coniferous);
        inv.replace_all(
            vec![
                make_tree("Pine", 20.0),
                make_tree("Spruce", 25.0),
                make_tree("Fir", 18.0),
            ],
            4.0,
        );
        inv
    }

    #[test]
    fn test_new_inventory() {
        let inv = Inventory::new(Category::Deciduous);
        assert_eq!(inv.category(), Category::Deciduous);
        assert!(inv.is_empty());
        assert_eq!(inv.area(), 0.0);
    }

    #[test]
    fn test_add_appends_to_end() {
        let mut inv = sample_inventory();
        let id = inv.add(make_tree("Larch", 22.0));
        assert_eq!(inv.len(), 4);
        assert_eq!(inv.id_at(3), Some(id));
    }

    #[test]
    fn test_add_allows_duplicates() {
        let mut inv = Inventory::new(Category::Coniferous);
        let a = inv.add(make_tree("Pine", 20.0));
        let b = inv.add(make_tree("Pine", 20.0));
        assert_ne!(a, b);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_remove_by_identity_not_value() {
        let mut inv = Inventory::new(Category::Coniferous);
        let first = inv.add(make_tree("Pine", 20.0));
        let second = inv.add(make_tree("Pine", 20.0));

        let removed = inv.remove(second);
        assert!(removed.is_some());
        assert_eq!(inv.ids(), vec![first]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut inv = sample_inventory();
        assert!(inv.remove(TreeId(999)).is_none());
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_replace_all_discards_prior_state() {
        let mut inv = sample_inventory();
        let old_ids = inv.ids();
        inv.replace_all(vec![make_tree("Cedar", 30.0)], 2.5);

        assert_eq!(inv.len(), 1);
        assert_eq!(inv.area(), 2.5);
        for id in old_ids {
            assert!(inv.get(id).is_none());
        }
    }

    #[test]
    fn test_sort_by_is_stable() {
        let mut inv = Inventory::new(Category::Coniferous);
        let a = inv.add(make_tree("Pine", 20.0));
        let b = inv.add(make_tree("Fir", 20.0));
        let c = inv.add(make_tree("Larch", 30.0));
        inv.sort_by(|x, y| y.height.total_cmp(&x.height));
        assert_eq!(inv.ids(), vec![c, a, b]);
    }

    #[test]
    fn test_trees_in_order() {
        let inv = sample_inventory();
        let names: Vec<&str> = inv.trees().map(|t| t.species.as_str()).collect();
        assert_eq!(names, vec!["Pine", "Spruce", "Fir"]);
    }
}
