mod tables;

pub use tables::{
    format_summary_table, format_tree_table, print_summary_table, print_tree_table,
};
