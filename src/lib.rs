pub mod analysis;
pub mod config;
pub mod error;
pub mod forest;
pub mod io;
pub mod models;
pub mod shell;
pub mod visualization;

pub use analysis::{Analyzer, SortCriterion};
pub use config::AppConfig;
pub use error::InventoryError;
pub use forest::{Forest, InventoryEvent, SharedForest};
pub use io::{ParsedStand, StandReader, StandWriter};
pub use models::{Category, Inventory, Tree, TreeDraft, TreeId};
pub use shell::Shell;
