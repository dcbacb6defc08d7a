use crate::core::codec::OnMalformed;
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

/// File-based settings. Every section is optional; missing keys fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub persistence: PersistenceConfig,
    pub reporting: ReportingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that relative file paths resolve against.
    pub base_path: String,
    /// Working inventory file loaded at start-up and written after changes.
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            data_file: "inventory.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub on_malformed: OnMalformed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Threshold used by `below` when none is given on the command line.
    pub low_stock_threshold: i64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            verbose: false,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InventoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InventoryError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InventoryError::ConfigError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.base_path", &self.storage.base_path)?;
        validate_path("storage.data_file", &self.storage.data_file)?;
        validate_one_of("logging.format", &self.logging.format, &LOG_FORMATS)?;
        Ok(())
    }

    pub fn json_logging(&self) -> bool {
        self.logging.format == "json"
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
