use crate::config::cli::Command;
use crate::core::batch::descriptions_from_reader;
use crate::core::inventory::Inventory;
use crate::domain::model::{Availability, Item, InventoryStats};
use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};
use serde::Serialize;
use std::fmt;
use std::io::BufRead;

pub struct CommandContext<'a, S: Storage> {
    pub storage: &'a S,
    pub low_stock_threshold: i64,
}

/// Structured result of one command. `Display` gives the console text,
/// `Serialize` the `--json` form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Listing { title: String, items: Vec<Item> },
    Found { item: Item },
    Added { item: Item },
    Updated { item: Item },
    Restocked { item: Item, added: i64 },
    Removed { name: String, count: usize },
    Availability { name: String, availability: Availability },
    Sorted { by: String },
    Extreme { label: String, item: Item },
    Statistics { stats: InventoryStats },
    Persisted { action: String, path: String, count: usize },
    Batch { requested: usize, added: usize, error: Option<String> },
}

pub fn execute<S: Storage>(
    inventory: &mut Inventory,
    command: &Command,
    ctx: &CommandContext<'_, S>,
    input: &mut dyn BufRead,
) -> Result<Outcome> {
    tracing::debug!("Executing {:?}", command);

    let outcome = match command {
        Command::List => Outcome::Listing {
            title: if inventory.is_empty() {
                "Inventory is empty.".to_string()
            } else {
                "Current Inventory:".to_string()
            },
            items: inventory.items().to_vec(),
        },
        Command::Add {
            name,
            quantity,
            price,
        } => {
            let item = Item::new(name.as_str(), *quantity, *price);
            inventory.add_item(item.clone());
            Outcome::Added { item }
        }
        Command::Remove { name } => Outcome::Removed {
            name: name.clone(),
            count: inventory.remove_item(name)?,
        },
        Command::Update {
            name,
            quantity,
            price,
        } => Outcome::Updated {
            item: inventory.update_item(name, *quantity, *price)?.clone(),
        },
        Command::Restock { name, quantity } => Outcome::Restocked {
            item: inventory.restock_item(name, *quantity)?.clone(),
            added: *quantity,
        },
        Command::Search { name } => Outcome::Found {
            item: inventory.search_item(name)?.clone(),
        },
        Command::Check { name } => Outcome::Availability {
            name: name.clone(),
            availability: inventory.check_item_availability(name)?,
        },
        Command::Below { threshold } => {
            let threshold = threshold.unwrap_or(ctx.low_stock_threshold);
            Outcome::Listing {
                title: format!("Items below threshold of {}:", threshold),
                items: owned(inventory.list_items_below_threshold(threshold)),
            }
        }
        Command::Filter { min, max } => Outcome::Listing {
            title: format!("Items in the price range ${} to ${}:", min, max),
            items: owned(inventory.filter_items_by_price_range(*min, *max)),
        },
        Command::SortName => {
            inventory.sort_items();
            Outcome::Sorted {
                by: "name".to_string(),
            }
        }
        Command::SortPrice => {
            inventory.sort_items_by_price();
            Outcome::Sorted {
                by: "price".to_string(),
            }
        }
        Command::MostExpensive => Outcome::Extreme {
            label: "Most expensive item".to_string(),
            item: inventory.most_expensive_item()?.clone(),
        },
        Command::LeastExpensive => Outcome::Extreme {
            label: "Least expensive item".to_string(),
            item: inventory.least_expensive_item()?.clone(),
        },
        Command::Stats => Outcome::Statistics {
            stats: inventory.statistics(),
        },
        Command::Save { path } => persisted("saved to", path, inventory.save_to_file(ctx.storage, path)?),
        Command::Load { path } => {
            persisted("loaded from", path, inventory.load_from_file(ctx.storage, path)?)
        }
        Command::Export { path } => {
            persisted("exported to", path, inventory.export_to_csv(ctx.storage, path)?)
        }
        Command::Import { path } => {
            persisted("imported from", path, inventory.import_from_csv(ctx.storage, path)?)
        }
        Command::BatchAdd { count } => {
            let mut descriptions = descriptions_from_reader(&mut *input);
            let outcome = inventory.batch_add_items(*count, descriptions.by_ref());
            if outcome.failure.is_some() {
                // The failed description was consumed; drop the rest of the batch.
                let unread = count.saturating_sub(outcome.added + 1);
                let skipped = descriptions.by_ref().take(unread).count();
                tracing::debug!("Discarded {} unread batch description(s)", skipped);
            }
            Outcome::Batch {
                requested: outcome.requested,
                added: outcome.added,
                error: outcome.failure.map(|e| e.to_string()),
            }
        }
        Command::Shell => {
            return Err(InventoryError::invalid_input(
                "command",
                "shell",
                "the shell cannot be started from inside itself",
            ))
        }
    };

    Ok(outcome)
}

pub fn render(outcome: &Outcome, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(outcome)?)
    } else {
        Ok(outcome.to_string())
    }
}

fn owned(items: Vec<&Item>) -> Vec<Item> {
    items.into_iter().cloned().collect()
}

fn persisted(action: &str, path: &str, count: usize) -> Outcome {
    Outcome::Persisted {
        action: action.to_string(),
        path: path.to_string(),
        count,
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Listing { title, items } => {
                write!(f, "{}", title)?;
                for item in items {
                    write!(f, "\n{}", item)?;
                }
                Ok(())
            }
            Outcome::Found { item } => write!(f, "Found: {}", item),
            Outcome::Added { item } => write!(f, "Item \"{}\" added.", item.name),
            Outcome::Updated { item } => write!(f, "Item \"{}\" updated.", item.name),
            Outcome::Restocked { item, added } => write!(
                f,
                "Restocked \"{}\" by {} units (now {}).",
                item.name, added, item.quantity
            ),
            Outcome::Removed { name, count: 1 } => {
                write!(f, "Item \"{}\" removed from inventory.", name)
            }
            Outcome::Removed { name, count } => write!(
                f,
                "Item \"{}\" removed from inventory ({} entries).",
                name, count
            ),
            Outcome::Availability {
                name,
                availability: Availability::InStock { quantity },
            } => write!(f, "Item \"{}\" is available with quantity: {}", name, quantity),
            Outcome::Availability {
                name,
                availability: Availability::OutOfStock,
            } => write!(f, "Item \"{}\" is out of stock.", name),
            Outcome::Sorted { by } => write!(f, "Inventory sorted by item {}.", by),
            Outcome::Extreme { label, item } => write!(f, "{}: {}", label, item),
            Outcome::Statistics { stats } => write!(
                f,
                "Total number of items: {}\nTotal value of inventory: ${:.2}",
                stats.item_count, stats.total_value
            ),
            Outcome::Persisted {
                action,
                path,
                count,
            } => write!(f, "Inventory {} {} ({} items).", action, path, count),
            Outcome::Batch {
                requested,
                added,
                error: None,
            } => write!(f, "Added {} of {} items.", added, requested),
            Outcome::Batch {
                requested,
                added,
                error: Some(error),
            } => write!(
                f,
                "Added {} of {} items before stopping: {}",
                added, requested, error
            ),
        }
    }
}
