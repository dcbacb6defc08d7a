use crate::adapters::storage::LocalStorage;
use crate::app::commands::{execute, render, CommandContext};
use crate::app::shell::run_shell;
use crate::config::cli::{CliConfig, Command};
use crate::config::toml_config::TomlConfig;
use crate::core::inventory::Inventory;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::io::{BufRead, Write};

/// Reads the optional config file, applies command-line overrides and validates.
pub fn resolve_config(cli: &CliConfig) -> Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Loads the data file (a missing file is an empty inventory), runs the
/// command, and writes the data file back if the command changed anything.
///
/// Returns whether the data file was saved.
pub fn run<R: BufRead, W: Write>(
    cli: &CliConfig,
    config: &TomlConfig,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let storage = LocalStorage::new(&config.storage.base_path);
    let data_file = config.storage.data_file.as_str();
    let mut inventory = Inventory::new().with_on_malformed(config.persistence.on_malformed);

    if storage.exists(data_file) {
        inventory.load_from_file(&storage, data_file)?;
    } else {
        tracing::info!(
            "No inventory at {}, starting empty",
            storage.resolve(data_file).display()
        );
    }

    let ctx = CommandContext {
        storage: &storage,
        low_stock_threshold: config.reporting.low_stock_threshold,
    };

    let mutated = match &cli.command {
        Command::Shell => {
            let summary = run_shell(&mut inventory, &ctx, input, output, cli.json)?;
            tracing::info!(
                "Shell finished: {} succeeded, {} failed",
                summary.executed,
                summary.failed
            );
            summary.mutated
        }
        command => {
            let outcome = execute(&mut inventory, command, &ctx, input)?;
            writeln!(output, "{}", render(&outcome, cli.json)?)?;
            command.mutates()
        }
    };

    if mutated {
        inventory.save_to_file(&storage, data_file)?;
    }
    Ok(mutated)
}
