//! The `name,quantity,price` line format shared by save/load and export/import.
//!
//! There is no header and no quoting: names are written verbatim and a `"` in a
//! name is an ordinary character. Names containing a comma or a line break
//! cannot be represented and are rejected on write.

use crate::domain::model::Item;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::validate_item_name;
use serde::{Deserialize, Serialize};

/// What to do with a line that does not decode into an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMalformed {
    /// Abort the whole read; the inventory is left untouched.
    #[default]
    Fail,
    /// Drop the line with a warning and keep going.
    Skip,
}

pub fn encode(items: &[Item]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for item in items {
        validate_item_name(&item.name)?;
        if !item.price.is_finite() {
            return Err(InventoryError::invalid_input(
                "price",
                item.price.to_string(),
                format!("item \"{}\" has a non-finite price", item.name),
            ));
        }
        let quantity = item.quantity.to_string();
        let price = item.price.to_string();
        writer.write_record([item.name.as_str(), quantity.as_str(), price.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| InventoryError::IoError(e.into_error()))
}

pub fn decode(data: &[u8], on_malformed: OnMalformed) -> Result<Vec<Item>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut items = Vec::new();
    for result in reader.records() {
        let parsed = result
            .map_err(|e| InventoryError::MalformedRecord {
                line: e.position().map_or(0, |p| p.line() as usize),
                reason: e.to_string(),
            })
            .and_then(|record| {
                if is_blank(&record) {
                    Ok(None)
                } else {
                    parse_record(&record).map(Some)
                }
            });

        match parsed {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) if on_malformed == OnMalformed::Skip => {
                tracing::warn!("Skipping record: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(items)
}

/// Whitespace-only lines reach us as records; the reader only drops empty ones.
fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn parse_record(record: &csv::StringRecord) -> Result<Item> {
    let line = record.position().map_or(0, |p| p.line() as usize);
    let malformed = |reason: String| InventoryError::MalformedRecord { line, reason };

    if record.len() != 3 {
        return Err(malformed(format!(
            "expected 3 fields (name,quantity,price), found {}",
            record.len()
        )));
    }

    let quantity_field = record[1].trim();
    let quantity = quantity_field
        .parse::<i64>()
        .map_err(|e| malformed(format!("quantity '{}': {}", quantity_field, e)))?;

    let price_field = record[2].trim();
    let price = price_field
        .parse::<f64>()
        .map_err(|e| malformed(format!("price '{}': {}", price_field, e)))?;
    if !price.is_finite() {
        return Err(malformed(format!("price '{}' is not a finite number", price_field)));
    }

    Ok(Item::new(&record[0], quantity, price))
}
