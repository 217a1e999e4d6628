use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::StandSummary;
use crate::models::{Category, Inventory, TreeId};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Format the trees of one inventory as a table, in sequence order.
///
/// Rows are numbered from 1; the `selected` tree is marked with `*`.
pub fn format_tree_table(inventory: &Inventory, precision: usize, selected: Option<TreeId>) -> String {
    let mut output = String::new();
    let title = format!("{} trees", capitalize(inventory.category()));
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec![
        "#",
        "",
        "Species",
        "Height (m)",
        "Diameter (cm)",
        "Age",
        "Wood type",
    ]);

    for (row, (id, tree)) in inventory.iter().enumerate() {
        let marker = if selected == Some(id) { "*" } else { "" };
        table.add_row(vec![
            Cell::new(row + 1),
            Cell::new(marker),
            Cell::new(&tree.species),
            Cell::new(format!("{:.*}", precision, tree.height)),
            Cell::new(format!("{:.*}", precision, tree.diameter)),
            Cell::new(tree.age),
            Cell::new(&tree.wood_type),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the tree table of one inventory.
pub fn print_tree_table(inventory: &Inventory, precision: usize, selected: Option<TreeId>) {
    print!("{}", format_tree_table(inventory, precision, selected));
}

/// Format the per-category stand summaries as one table.
pub fn format_summary_table(summaries: &[(Category, StandSummary)], precision: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Stand Summary".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec![
        "Category",
        "Trees",
        "Area (ha)",
        "Density (trees/ha)",
        "Average age",
    ]);

    for (category, summary) in summaries {
        table.add_row(vec![
            Cell::new(capitalize(*category)),
            Cell::new(summary.count),
            Cell::new(summary.area),
            Cell::new(format!("{:.*}", precision, summary.density)),
            Cell::new(format!("{:.*}", precision, summary.average_age)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the per-category stand summaries.
pub fn print_summary_table(summaries: &[(Category, StandSummary)], precision: usize) {
    print!("{}", format_summary_table(summaries, precision));
}

fn capitalize(category: Category) -> String {
    let name = category.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}
