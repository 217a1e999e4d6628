use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Identity of a tree stored in an inventory.
///
/// Two trees with identical measurements are still different records; removal
/// and selection go through this id, never through field equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeId(pub u64);

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tree measurement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Species name (e.g., "Pine")
    pub species: String,
    /// Total height in meters
    pub height: f64,
    /// Stem diameter in centimeters
    pub diameter: f64,
    /// Age in years
    pub age: i32,
    /// Free-text wood type, may contain spaces
    pub wood_type: String,
}

impl Tree {
    /// Check the record invariant for trees that did not come through
    /// [`TreeDraft::build`]: the species is non-empty and already trimmed.
    pub fn validate(&self) -> Result<(), InventoryError> {
        let species = required_species(&self.species)?;
        if species != self.species {
            return Err(InventoryError::ValidationError(format!(
                "species '{}' has surrounding whitespace",
                self.species
            )));
        }
        Ok(())
    }
}

/// Trimmed species, or a validation error when nothing is left.
fn required_species(raw: &str) -> Result<&str, InventoryError> {
    let species = raw.trim();
    if species.is_empty() {
        return Err(InventoryError::ValidationError(
            "species is required".to_string(),
        ));
    }
    Ok(species)
}

/// Parse a decimal number that may use either `.` or `,` as separator.
///
/// Surrounding whitespace is ignored. Non-finite values (`NaN`, `inf`) are
/// rejected.
///
/// # Examples
///
/// ```
/// use tree_inventory::models::parse_decimal;
///
/// assert_eq!(parse_decimal("12,5"), Some(12.5));
/// assert_eq!(parse_decimal(" 8.3 "), Some(8.3));
/// assert_eq!(parse_decimal("tall"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Raw, unvalidated text fields for a new tree, as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDraft {
    pub species: String,
    pub height: String,
    pub diameter: String,
    pub age: String,
    /// `None` means "use the category default".
    pub wood_type: Option<String>,
}

impl TreeDraft {
    /// Validate the draft and build a [`Tree`].
    ///
    /// The species is trimmed, the wood type is kept verbatim and falls back
    /// to `default_wood_type` when absent. No numeric bounds are enforced.
    pub fn build(&self, default_wood_type: &str) -> Result<Tree, InventoryError> {
        let species = required_species(&self.species)?;
        let height = parse_decimal(&self.height).ok_or_else(|| {
            InventoryError::ValidationError(format!(
                "height must be a number, got '{}'",
                self.height
            ))
        })?;
        let diameter = parse_decimal(&self.diameter).ok_or_else(|| {
            InventoryError::ValidationError(format!(
                "diameter must be a number, got '{}'",
                self.diameter
            ))
        })?;
        let age = self.age.trim().parse::<i32>().map_err(|_| {
            InventoryError::ValidationError(format!(
                "age must be a whole number, got '{}'",
                self.age
            ))
        })?;

        Ok(Tree {
            species: species.to_string(),
            height,
            diameter,
            age,
            wood_type: self
                .wood_type
                .clone()
                .unwrap_or_else(|| default_wood_type.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(species: &str, height: &str, diameter: &str, age: &str) -> TreeDraft {
        TreeDraft {
            species: species.to_string(),
            height: height.to_string(),
            diameter: diameter.to_string(),
            age: age.to_string(),
            wood_type: None,
        }
    }

    // --- parse_decimal ---

    #[test]
    fn test_parse_decimal_dot_and_comma() {
        assert_eq!(parse_decimal("20.5"), Some(20.5));
        assert_eq!(parse_decimal("20,5"), Some(20.5));
        assert_eq!(parse_decimal("30"), Some(30.0));
    }

    #[test]
    fn test_parse_decimal_negative_passes() {
        assert_eq!(parse_decimal("-1,5"), Some(-1.5));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    // --- TreeDraft::build ---

    #[test]
    fn test_build_comma_separators() {
        let tree = draft("Spruce", "12,5", "8,3", "40").build("coniferous").unwrap();
        assert_eq!(tree.height, 12.5);
        assert_eq!(tree.diameter, 8.3);
        assert_eq!(tree.age, 40);
    }

    #[test]
    fn test_build_trims_species() {
        let tree = draft("  Pine \t", "10", "20", "30").build("coniferous").unwrap();
        assert_eq!(tree.species, "Pine");
    }

    #[test]
    fn test_build_uses_default_wood_type() {
        let tree = draft("Pine", "10", "20", "30").build("coniferous").unwrap();
        assert_eq!(tree.wood_type, "coniferous");
    }

    #[test]
    fn test_build_keeps_wood_type_verbatim() {
        let mut d = draft("Birch", "10", "20", "30");
        d.wood_type = Some(" soft  broadleaf ".to_string());
        let tree = d.build("deciduous").unwrap();
        assert_eq!(tree.wood_type, " soft  broadleaf ");
    }

    #[test]
    fn test_build_rejects_blank_species() {
        let err = draft("   ", "10", "20", "30").build("coniferous").unwrap_err();
        assert!(matches!(err, InventoryError::ValidationError(_)));
    }

    #[test]
    fn test_build_rejects_blank_height() {
        assert!(draft("Pine", "", "20", "30").build("coniferous").is_err());
    }

    #[test]
    fn test_build_rejects_bad_diameter() {
        assert!(draft("Pine", "10", "wide", "30").build("coniferous").is_err());
    }

    #[test]
    fn test_build_rejects_fractional_age() {
        assert!(draft("Pine", "10", "20", "30.5").build("coniferous").is_err());
        assert!(draft("Pine", "10", "20", "old").build("coniferous").is_err());
    }

    #[test]
    fn test_build_allows_negative_and_zero() {
        let tree = draft("Pine", "-1", "0", "-5").build("coniferous").unwrap();
        assert_eq!(tree.height, -1.0);
        assert_eq!(tree.diameter, 0.0);
        assert_eq!(tree.age, -5);
    }

    #[test]
    fn test_validate_record_species() {
        let mut tree = draft("Pine", "10", "20", "30").build("coniferous").unwrap();
        assert!(tree.validate().is_ok());

        tree.species = "  Pine ".to_string();
        assert!(matches!(tree.validate(), Err(InventoryError::ValidationError(_))));

        tree.species = String::new();
        assert!(matches!(tree.validate(), Err(InventoryError::ValidationError(_))));
    }

    #[test]
    fn test_tree_id_display() {
        assert_eq!(TreeId(7).to_string(), "#7");
    }
}
