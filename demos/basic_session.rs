//! Basic session example: load both stands, edit, sort, search and report.
//!
//! Run from the project root:
//!   cargo run --example basic_session

use std::path::Path;

use tree_inventory::analysis::StandSummary;
use tree_inventory::visualization::{print_summary_table, print_tree_table};
use tree_inventory::{Category, Forest, SortCriterion, TreeDraft};

fn main() {
    let mut forest = Forest::default();
    let events = forest.subscribe();

    forest
        .load_file(Category::Coniferous, Path::new("data/coniferous.txt"))
        .expect("Failed to read coniferous stand");
    forest
        .load_file(Category::Deciduous, Path::new("data/deciduous.txt"))
        .expect("Failed to read deciduous stand");

    let draft = TreeDraft {
        species: "Rowan".into(),
        height: "9,5".into(),
        diameter: "14".into(),
        age: "22".into(),
        wood_type: None,
    };
    forest
        .add_draft(Category::Deciduous, &draft)
        .expect("Rowan should validate");

    forest.sort(Category::Deciduous, SortCriterion::Species);
    print_tree_table(forest.inventory(Category::Deciduous), 2, None);

    match forest.search(Category::Coniferous, "larch") {
        Ok(id) => println!("\nSelected larch {id}"),
        Err(e) => eprintln!("{e}"),
    }

    if let Ok((_, tree)) = forest.tallest(Category::Coniferous) {
        println!("Tallest conifer: {}, {} m", tree.species, tree.height);
    }

    let summaries: Vec<(Category, StandSummary)> = Category::ALL
        .iter()
        .map(|c| (*c, forest.summary(*c)))
        .collect();
    print_summary_table(&summaries, 2);

    println!("\n{} change events", events.try_iter().count());
}
