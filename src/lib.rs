pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::storage::LocalStorage;
pub use config::TomlConfig;
pub use core::codec::OnMalformed;
pub use core::inventory::Inventory;
pub use domain::model::{Availability, BatchOutcome, Item, InventoryStats};
pub use domain::ports::Storage;
pub use utils::error::{ErrorCategory, InventoryError, Result};
