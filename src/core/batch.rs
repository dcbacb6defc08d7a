//! Item descriptions for batch add: `<name> <quantity> <price>`, separated by
//! whitespace. The last two tokens are the numbers; everything before them is
//! the name, so `Blue Widget 4 1.25` names "Blue Widget".

use crate::domain::model::Item;
use crate::utils::error::{InventoryError, Result};
use std::io::BufRead;

pub fn parse_item_description(line: &str) -> Result<Item> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(InventoryError::invalid_input(
            "item description",
            line.trim(),
            "expected '<name> <quantity> <price>'",
        ));
    }

    let (name_tokens, numbers) = tokens.split_at(tokens.len() - 2);
    let quantity = numbers[0].parse::<i64>().map_err(|e| {
        InventoryError::invalid_input("quantity", numbers[0], e.to_string())
    })?;
    let price = parse_price(numbers[1])?;

    Ok(Item::new(name_tokens.join(" "), quantity, price))
}

pub fn parse_price(value: &str) -> Result<f64> {
    let price = value
        .parse::<f64>()
        .map_err(|e| InventoryError::invalid_input("price", value, e.to_string()))?;
    if !price.is_finite() {
        return Err(InventoryError::invalid_input(
            "price",
            value,
            "must be a finite number",
        ));
    }
    Ok(price)
}

/// Reads descriptions line by line, skipping blank lines.
pub fn descriptions_from_reader<R: BufRead>(reader: R) -> impl Iterator<Item = Result<Item>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(parse_item_description(&line)),
        Err(e) => Some(Err(InventoryError::IoError(e))),
    })
}
