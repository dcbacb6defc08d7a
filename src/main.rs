use clap::Parser;
use small_inventory::app::{resolve_config, run};
use small_inventory::utils::logger;
use small_inventory::{CliConfig, InventoryError};
use std::io;

fn fail(e: &InventoryError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.category().exit_code());
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.category().exit_code());
        }
    };

    if config.json_logging() {
        logger::init_json_logger(config.logging.verbose);
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run(&cli, &config, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(saved) => {
            if saved {
                tracing::debug!("Saved {}", config.storage.data_file);
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}
