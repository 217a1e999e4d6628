use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::analysis::{self, Analyzer, Averages, SortCriterion, StandSummary};
use crate::config::AppConfig;
use crate::error::InventoryError;
use crate::io::{self, ParsedStand};
use crate::models::{Category, Inventory, Tree, TreeDraft, TreeId};

/// Change notification emitted after every mutation of a [`Forest`].
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    Loaded {
        category: Category,
        count: usize,
        area: f64,
    },
    Added {
        category: Category,
        id: TreeId,
    },
    Removed {
        category: Category,
        id: TreeId,
    },
    Sorted {
        category: Category,
        criterion: SortCriterion,
    },
    SelectionChanged(Option<(Category, TreeId)>),
    CategoryChanged(Category),
}

/// Both stand inventories plus the active category and current selection.
///
/// Every operation names its category explicitly; [`Forest::active`] is only
/// the default a front end passes along.
pub struct Forest {
    coniferous: Inventory,
    deciduous: Inventory,
    active: Category,
    selected: Option<(Category, TreeId)>,
    config: AppConfig,
    subscribers: Vec<Sender<InventoryEvent>>,
}

impl Default for Forest {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Forest {
    pub fn new(config: AppConfig) -> Self {
        Self {
            coniferous: Inventory::new(Category::Coniferous),
            deciduous: Inventory::new(Category::Deciduous),
            active: Category::Coniferous,
            selected: None,
            config,
            subscribers: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register for change notifications. Dropped receivers are pruned on the
    /// next event.
    pub fn subscribe(&mut self) -> Receiver<InventoryEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn inventory(&self, category: Category) -> &Inventory {
        match category {
            Category::Coniferous => &self.coniferous,
            Category::Deciduous => &self.deciduous,
        }
    }

    fn inventory_mut(&mut self, category: Category) -> &mut Inventory {
        match category {
            Category::Coniferous => &mut self.coniferous,
            Category::Deciduous => &mut self.deciduous,
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    /// Switch the active category. Any selection is cleared.
    pub fn select_category(&mut self, category: Category) {
        if self.active == category {
            return;
        }
        self.active = category;
        self.notify(InventoryEvent::CategoryChanged(category));
        self.set_selection(None);
    }

    /// Replace a category's trees and area with a parsed stand.
    pub fn replace(&mut self, category: Category, stand: ParsedStand) -> usize {
        let count = stand.trees.len();
        let area = stand.area;
        self.inventory_mut(category).replace_all(stand.trees, area);
        if matches!(self.selected, Some((c, _)) if c == category) {
            self.set_selection(None);
        }
        info!(%category, count, area, "inventory loaded");
        self.notify(InventoryEvent::Loaded {
            category,
            count,
            area,
        });
        count
    }

    /// Parse stand text into a category. On error nothing changes.
    pub fn load_text(&mut self, category: Category, text: &str) -> Result<usize, InventoryError> {
        let stand = io::parse_stand(text)?;
        Ok(self.replace(category, stand))
    }

    /// Load a stand file (plain text, or a `.json` export) into a category.
    /// On error nothing changes.
    pub fn load_file(&mut self, category: Category, path: &Path) -> Result<usize, InventoryError> {
        let stand = io::reader_for(path).read(path)?;
        Ok(self.replace(category, stand))
    }

    /// Append an already validated tree.
    pub fn add(&mut self, category: Category, tree: Tree) -> TreeId {
        let id = self.inventory_mut(category).add(tree);
        debug!(%category, %id, "tree added");
        self.notify(InventoryEvent::Added { category, id });
        id
    }

    /// Validate raw fields and append the resulting tree.
    pub fn add_draft(
        &mut self,
        category: Category,
        draft: &TreeDraft,
    ) -> Result<TreeId, InventoryError> {
        let tree = draft.build(self.config.default_wood_type(category))?;
        Ok(self.add(category, tree))
    }

    /// Remove a tree by identity. Clears the selection if it pointed at it.
    pub fn remove(&mut self, category: Category, id: TreeId) -> Option<Tree> {
        let removed = self.inventory_mut(category).remove(id)?;
        debug!(%category, %id, "tree removed");
        self.notify(InventoryEvent::Removed { category, id });
        if self.selected == Some((category, id)) {
            self.set_selection(None);
        }
        Some(removed)
    }

    /// Currently selected tree, if any.
    pub fn selected(&self) -> Option<(Category, TreeId, &Tree)> {
        let (category, id) = self.selected?;
        self.inventory(category)
            .get(id)
            .map(|tree| (category, id, tree))
    }

    /// Mark a tree as current selection.
    pub fn select(&mut self, category: Category, id: TreeId) -> Result<(), InventoryError> {
        if self.inventory(category).get(id).is_none() {
            return Err(InventoryError::NotFound(id.to_string()));
        }
        self.set_selection(Some((category, id)));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(None);
    }

    /// Remove the selected tree and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Tree> {
        let (category, id) = self.selected?;
        let removed = self.remove(category, id);
        self.set_selection(None);
        removed
    }

    /// Stable in-place sort of one category.
    pub fn sort(&mut self, category: Category, criterion: SortCriterion) {
        analysis::sort(self.inventory_mut(category), criterion);
        info!(%category, %criterion, "inventory sorted");
        self.notify(InventoryEvent::Sorted {
            category,
            criterion,
        });
    }

    /// Sort by a free-text label, returning the criterion it resolved to.
    /// Unknown labels change nothing and yield `None`.
    pub fn sort_by_label(&mut self, category: Category, label: &str) -> Option<SortCriterion> {
        match label.parse::<SortCriterion>() {
            Ok(criterion) => {
                self.sort(category, criterion);
                Some(criterion)
            }
            Err(_) => {
                debug!(%category, label, "unknown sort criterion ignored");
                None
            }
        }
    }

    /// Find a tree by species and make it the current selection.
    pub fn search(&mut self, category: Category, species: &str) -> Result<TreeId, InventoryError> {
        let (id, _) = analysis::find(self.inventory(category), species)?;
        self.set_selection(Some((category, id)));
        Ok(id)
    }

    pub fn summary(&self, category: Category) -> StandSummary {
        Analyzer::new(self.inventory(category)).summary()
    }

    pub fn averages(&self, category: Category) -> Result<Averages, InventoryError> {
        Analyzer::new(self.inventory(category)).averages()
    }

    pub fn tallest(&self, category: Category) -> Result<(TreeId, &Tree), InventoryError> {
        Analyzer::new(self.inventory(category)).tallest()
    }

    pub fn thickest(&self, category: Category) -> Result<(TreeId, &Tree), InventoryError> {
        Analyzer::new(self.inventory(category)).thickest()
    }

    fn set_selection(&mut self, selection: Option<(Category, TreeId)>) {
        if self.selected == selection {
            return;
        }
        self.selected = selection;
        self.notify(InventoryEvent::SelectionChanged(selection));
    }

    fn notify(&mut self, event: InventoryEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// A [`Forest`] behind a mutex, for hosts that touch it from several threads.
///
/// Every mutation runs under the lock, so readers never observe a
/// half-applied load, sort or removal.
pub struct SharedForest {
    inner: Mutex<Forest>,
}

impl SharedForest {
    pub fn new(forest: Forest) -> Self {
        Self {
            inner: Mutex::new(forest),
        }
    }

    /// Run a read-only closure under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&Forest) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a mutation under the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Forest) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Cloned copy of one category's inventory.
    pub fn snapshot(&self, category: Category) -> Inventory {
        self.read(|forest| forest.inventory(category).clone())
    }

    pub fn into_inner(self) -> Forest {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
