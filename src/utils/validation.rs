use crate::utils::error::{InventoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(InventoryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Item names end up as the first field of a comma-delimited line, so they
/// must not contain the delimiter or a line break.
pub fn validate_item_name(name: &str) -> Result<()> {
    if let Some(bad) = name.chars().find(|c| matches!(c, ',' | '\n' | '\r')) {
        return Err(InventoryError::invalid_input(
            "item name",
            name,
            format!("contains {:?}, which the file format cannot represent", bad),
        ));
    }
    Ok(())
}
