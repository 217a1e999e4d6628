mod category;
mod inventory;
mod tree;

pub use category::Category;
pub use inventory::Inventory;
pub use tree::{parse_decimal, Tree, TreeDraft, TreeId};
