use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::InventoryError;
use crate::models::{parse_decimal, Inventory, Tree};

/// Minimum whitespace-separated tokens for a tree line.
const MIN_TOKENS: usize = 5;

/// Result of parsing a stand file: the area header plus every tree line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStand {
    /// Stand area in hectares
    pub area: f64,
    pub trees: Vec<Tree>,
}

/// Parse the full text of a stand file.
///
/// The first non-blank line is the area; it must parse or the whole parse
/// fails with [`InventoryError::MalformedHeader`]. Tree lines with fewer than
/// five tokens are skipped, and malformed numeric fields default to zero.
///
/// # Examples
///
/// ```
/// use tree_inventory::io::parse_stand;
///
/// let stand = parse_stand("10\nOak 20.5 30 50 broadleaf\nPine 15 20 40").unwrap();
/// assert_eq!(stand.area, 10.0);
/// assert_eq!(stand.trees.len(), 1);
/// assert_eq!(stand.trees[0].wood_type, "broadleaf");
/// ```
pub fn parse_stand(text: &str) -> Result<ParsedStand, InventoryError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let header = lines.next().map(|(_, line)| line.trim()).unwrap_or("");
    let area =
        parse_decimal(header).ok_or_else(|| InventoryError::MalformedHeader(header.to_string()))?;

    let trees = lines
        .filter_map(|(index, line)| parse_tree_line(index + 1, line))
        .collect();

    Ok(ParsedStand { area, trees })
}

/// Parse one tree line leniently. `None` when the line is too short.
fn parse_tree_line(line_no: usize, line: &str) -> Option<Tree> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        debug!(line = line_no, tokens = tokens.len(), "skipping short tree line");
        return None;
    }

    let height = decimal_or_zero(line_no, "height", tokens[1]);
    let diameter = decimal_or_zero(line_no, "diameter", tokens[2]);
    let age = tokens[3].parse::<i32>().unwrap_or_else(|_| {
        warn!(line = line_no, field = "age", value = tokens[3], "unparseable field, using 0");
        0
    });

    Some(Tree {
        species: tokens[0].to_string(),
        height,
        diameter,
        age,
        wood_type: tokens[MIN_TOKENS - 1..].join(" "),
    })
}

fn decimal_or_zero(line_no: usize, field: &str, token: &str) -> f64 {
    parse_decimal(token).unwrap_or_else(|| {
        warn!(line = line_no, field, value = token, "unparseable field, using 0");
        0.0
    })
}

/// Read and parse a stand file.
pub fn read_text(path: impl AsRef<Path>) -> Result<ParsedStand, InventoryError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_stand(&content)
}

/// Render an inventory back into the stand file format.
///
/// A species containing whitespace or a blank wood type cannot be read back
/// from a tree line, so such a tree fails the whole render with
/// [`InventoryError::ValidationError`].
pub fn format_text(inventory: &Inventory) -> Result<String, InventoryError> {
    let mut out = format!("{}\n", inventory.area());
    for (id, tree) in inventory.iter() {
        if tree.species.contains(char::is_whitespace) {
            return Err(InventoryError::ValidationError(format!(
                "species '{}' of tree {id} contains whitespace and cannot be written as text",
                tree.species
            )));
        }
        if tree.wood_type.trim().is_empty() {
            return Err(InventoryError::ValidationError(format!(
                "tree {id} ({}) has no wood type and cannot be written as text",
                tree.species
            )));
        }
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            tree.species, tree.height, tree.diameter, tree.age, tree.wood_type
        ));
    }
    Ok(out)
}

/// Write an inventory in the stand file format. Nothing is written when the
/// inventory cannot be rendered.
pub fn write_text(inventory: &Inventory, path: impl AsRef<Path>) -> Result<(), InventoryError> {
    let content = format_text(inventory)?;
    let mut file = std::fs::File::create(path.as_ref())?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_parse_skips_short_lines() {
        let stand = parse_stand("10\nOak 20.5 30 50 broadleaf\nPine 15 20 40").unwrap();
        assert_eq!(stand.area, 10.0);
        assert_eq!(stand.trees.len(), 1);
        let oak = &stand.trees[0];
        assert_eq!(oak.species, "Oak");
        assert_eq!(oak.height, 20.5);
        assert_eq!(oak.diameter, 30.0);
        assert_eq!(oak.age, 50);
        assert_eq!(oak.wood_type, "broadleaf");
    }

    #[test]
    fn test_parse_area_with_comma() {
        let stand = parse_stand("12,75\n").unwrap();
        assert_eq!(stand.area, 12.75);
        assert!(stand.trees.is_empty());
    }

    #[test]
    fn test_parse_skips_leading_blank_lines() {
        let stand = parse_stand("\n   \n 3.5 \nPine 10 12 30 soft wood\n").unwrap();
        assert_eq!(stand.area, 3.5);
        assert_eq!(stand.trees.len(), 1);
    }

    #[test]
    fn test_parse_malformed_header() {
        let err = parse_stand("area\nOak 20 30 50 broadleaf").unwrap_err();
        assert!(matches!(err, InventoryError::MalformedHeader(ref h) if h == "area"));
    }

    #[test]
    fn test_parse_empty_text_is_malformed() {
        assert!(matches!(
            parse_stand(""),
            Err(InventoryError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_parse_joins_wood_type_words() {
        let stand = parse_stand("1\nPine\t10  12 30   hard \t resinous wood\n").unwrap();
        assert_eq!(stand.trees[0].wood_type, "hard resinous wood");
    }

    #[test]
    fn test_parse_defaults_bad_numbers_to_zero() {
        let stand = parse_stand("1\nPine tall 12,5 old coniferous\n").unwrap();
        let pine = &stand.trees[0];
        assert_eq!(pine.height, 0.0);
        assert_eq!(pine.diameter, 12.5);
        assert_eq!(pine.age, 0);
    }

    #[test]
    fn test_parse_skips_blank_lines_between_trees() {
        let stand = parse_stand("2\nPine 1 2 3 a\n\n   \nFir 4 5 6 b\n").unwrap();
        assert_eq!(stand.trees.len(), 2);
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = read_text("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, InventoryError::Io(_)));
    }

    #[test]
    fn test_text_roundtrip_through_file() {
        let mut inv = Inventory::new(Category::Deciduous);
        let stand = parse_stand("7,5\nOak 20.5 30 50 broadleaf\nBirch 18 22 35 soft broadleaf\n")
            .unwrap();
        inv.replace_all(stand.trees.clone(), stand.area);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stand.txt");
        write_text(&inv, &path).unwrap();

        let reread = read_text(&path).unwrap();
        assert_eq!(reread, stand);
    }

    fn tree(species: &str, wood_type: &str) -> Tree {
        Tree {
            species: species.to_string(),
            height: 20.0,
            diameter: 30.0,
            age: 50,
            wood_type: wood_type.to_string(),
        }
    }

    #[test]
    fn test_format_rejects_multi_word_species() {
        let mut inv = Inventory::new(Category::Coniferous);
        inv.replace_all(vec![tree("Scots Pine", "coniferous")], 3.0);
        let err = format_text(&inv).unwrap_err();
        assert!(matches!(err, InventoryError::ValidationError(ref m) if m.contains("Scots Pine")));
    }

    #[test]
    fn test_format_rejects_blank_wood_type() {
        let mut inv = Inventory::new(Category::Coniferous);
        inv.replace_all(vec![tree("Pine", "coniferous"), tree("Fir", "")], 3.0);
        assert!(matches!(
            format_text(&inv),
            Err(InventoryError::ValidationError(_))
        ));
    }

    #[test]
    fn test_write_text_refusal_leaves_no_file() {
        let mut inv = Inventory::new(Category::Coniferous);
        inv.replace_all(vec![tree("Scots Pine", "coniferous")], 3.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stand.txt");
        assert!(write_text(&inv, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_format_then_parse_keeps_every_tree() {
        let mut inv = Inventory::new(Category::Deciduous);
        let trees = vec![tree("Oak", "hard broadleaf"), tree("Birch", "broadleaf")];
        inv.replace_all(trees.clone(), 2.5);
        let stand = parse_stand(&format_text(&inv).unwrap()).unwrap();
        assert_eq!(stand.area, 2.5);
        assert_eq!(stand.trees, trees);
    }
}
