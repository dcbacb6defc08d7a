use crate::config::toml_config::TomlConfig;
use crate::core::codec::OnMalformed;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "small-inventory")]
#[command(about = "Inventory store with flat-file persistence")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory that file paths resolve against
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Working inventory file, loaded before and saved after mutating commands
    #[arg(short = 'f', long)]
    pub data_file: Option<String>,

    /// Skip malformed lines when loading instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Command-line flags win over file values.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(dir) = &self.data_dir {
            config.storage.base_path = dir.clone();
        }
        if let Some(file) = &self.data_file {
            config.storage.data_file = file.clone();
        }
        if self.skip_malformed {
            config.persistence.on_malformed = OnMalformed::Skip;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Show every item in order
    List,
    /// Append an item
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
        #[arg(allow_hyphen_values = true)]
        price: f64,
    },
    /// Remove every item with this name
    Remove { name: String },
    /// Overwrite quantity and price of the first match
    Update {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
        #[arg(allow_hyphen_values = true)]
        price: f64,
    },
    /// Add to (or, when negative, subtract from) the quantity of the first match
    Restock {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Show the first item with this name
    Search { name: String },
    /// Report whether the first match is in stock
    Check { name: String },
    /// List items with quantity below the threshold
    Below {
        #[arg(allow_hyphen_values = true)]
        threshold: Option<i64>,
    },
    /// List items priced within [min, max]
    Filter {
        #[arg(allow_hyphen_values = true)]
        min: f64,
        #[arg(allow_hyphen_values = true)]
        max: f64,
    },
    /// Sort by name
    SortName,
    /// Sort by ascending price
    SortPrice,
    /// Show the item with the highest price
    MostExpensive,
    /// Show the item with the lowest price
    LeastExpensive,
    /// Show item count and total value
    Stats,
    /// Write the inventory to a file
    Save { path: String },
    /// Replace the inventory with the contents of a file
    Load { path: String },
    /// Write the inventory to a CSV file
    Export { path: String },
    /// Append the contents of a CSV file
    Import { path: String },
    /// Read COUNT lines of `<name> <quantity> <price>` from standard input.
    ///
    /// Stops at the first bad line; items read before it are kept and the
    /// remaining lines of the batch are discarded.
    BatchAdd { count: usize },
    /// Read commands line by line from standard input
    Shell,
}

impl Command {
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Remove { .. }
                | Command::Update { .. }
                | Command::Restock { .. }
                | Command::SortName
                | Command::SortPrice
                | Command::Load { .. }
                | Command::Import { .. }
                | Command::BatchAdd { .. }
        )
    }
}

/// One line typed into the shell, parsed with the same subcommands.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, name = "small-inventory")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}
