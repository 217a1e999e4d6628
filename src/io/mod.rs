mod csv_io;
mod json_io;
mod text_io;

use std::path::Path;

use crate::error::InventoryError;
use crate::models::Inventory;

pub use csv_io::write_csv;
pub use json_io::{read_json, write_json, StandExport};
pub use text_io::{format_text, parse_stand, read_text, write_text, ParsedStand};

/// Trait for reading a stand (area plus trees) from a file.
pub trait StandReader {
    fn read(&self, path: &Path) -> Result<ParsedStand, InventoryError>;
}

/// Trait for writing one inventory to a file.
pub trait StandWriter {
    fn write(&self, inventory: &Inventory, path: &Path) -> Result<(), InventoryError>;
}

/// Plain-text stand format: area header followed by one tree per line.
pub struct TextFormat;

impl StandReader for TextFormat {
    fn read(&self, path: &Path) -> Result<ParsedStand, InventoryError> {
        read_text(path)
    }
}

impl StandWriter for TextFormat {
    fn write(&self, inventory: &Inventory, path: &Path) -> Result<(), InventoryError> {
        write_text(inventory, path)
    }
}

/// JSON format reader/writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl StandReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<ParsedStand, InventoryError> {
        read_json(path)
    }
}

impl StandWriter for JsonFormat {
    fn write(&self, inventory: &Inventory, path: &Path) -> Result<(), InventoryError> {
        write_json(inventory, path, self.pretty)
    }
}

/// CSV export (write only; CSV carries no area header).
pub struct CsvFormat;

impl StandWriter for CsvFormat {
    fn write(&self, inventory: &Inventory, path: &Path) -> Result<(), InventoryError> {
        write_csv(inventory, path)
    }
}

/// Pick a reader by file extension. Anything that is not `.json` is read as
/// the plain-text stand format.
pub fn reader_for(path: &Path) -> Box<dyn StandReader> {
    match extension(path).as_str() {
        "json" => Box::new(JsonFormat::default()),
        _ => Box::new(TextFormat),
    }
}

/// Pick a writer by file extension.
pub fn writer_for(path: &Path, pretty: bool) -> Result<Box<dyn StandWriter>, InventoryError> {
    match extension(path).as_str() {
        "json" => Ok(Box::new(JsonFormat { pretty })),
        "csv" => Ok(Box::new(CsvFormat)),
        "txt" => Ok(Box::new(TextFormat)),
        other => Err(InventoryError::Io(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("unsupported output format: .{other}"),
        ))),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
