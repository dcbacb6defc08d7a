use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Item \"{name}\" not found")]
    NotFound { name: String },

    #[error("Inventory is empty")]
    EmptyCollection,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid configuration value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    EmptyCollection,
    Io,
    InvalidInput,
    Configuration,
}

impl ErrorCategory {
    /// Process exit status used by the binary.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Configuration => 1,
            ErrorCategory::InvalidInput => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::NotFound => 4,
            ErrorCategory::EmptyCollection => 5,
        }
    }
}

impl InventoryError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        InventoryError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        InventoryError::NotFound { name: name.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::NotFound { .. } => ErrorCategory::NotFound,
            InventoryError::EmptyCollection => ErrorCategory::EmptyCollection,
            InventoryError::IoError(_)
            | InventoryError::CsvError(_)
            | InventoryError::SerializationError(_) => ErrorCategory::Io,
            InventoryError::InvalidInput { .. } | InventoryError::MalformedRecord { .. } => {
                ErrorCategory::InvalidInput
            }
            InventoryError::ConfigError { .. }
            | InventoryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Short message for end users, without the underlying source chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            InventoryError::NotFound { name } => format!("Item \"{}\" not found.", name),
            InventoryError::EmptyCollection => "Inventory is empty.".to_string(),
            InventoryError::IoError(_) | InventoryError::CsvError(_) => {
                "Unable to open file.".to_string()
            }
            InventoryError::SerializationError(e) => format!("Unable to render output: {}", e),
            InventoryError::InvalidInput { field, value, .. } => {
                format!("'{}' is not a valid {}.", value, field)
            }
            InventoryError::MalformedRecord { line, .. } => {
                format!("The inventory file is malformed at line {}.", line)
            }
            InventoryError::ConfigError { .. } | InventoryError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Check the item name; names are case-sensitive",
            ErrorCategory::EmptyCollection => "Add or load items first",
            ErrorCategory::Io => "Check that the path exists and is readable/writable",
            ErrorCategory::InvalidInput => {
                "Quantities must be integers and prices decimals using '.'; names cannot contain commas"
            }
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            InventoryError::not_found("Widget").category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            InventoryError::MalformedRecord {
                line: 3,
                reason: "expected 3 fields".to_string()
            }
            .category(),
            ErrorCategory::InvalidInput
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(InventoryError::from(io).category(), ErrorCategory::Io);
    }

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let codes = [
            ErrorCategory::Configuration,
            ErrorCategory::InvalidInput,
            ErrorCategory::Io,
            ErrorCategory::NotFound,
            ErrorCategory::EmptyCollection,
        ]
        .map(ErrorCategory::exit_code);
        assert_eq!(codes, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_messages() {
        let err = InventoryError::not_found("Widget");
        assert_eq!(err.to_string(), "Item \"Widget\" not found");
        assert_eq!(err.user_friendly_message(), "Item \"Widget\" not found.");
        assert_eq!(
            InventoryError::EmptyCollection.user_friendly_message(),
            "Inventory is empty."
        );
    }
}
