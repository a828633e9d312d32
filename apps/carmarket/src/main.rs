use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, StorageBackend};

use car_market::config::CarMarketConfig;
use car_market::domain::ports::KeyValueStore;
use car_market::error::CarMarketError;
use car_market::infra::storage::{FileStore, InMemoryStore};
use car_market::CarMarket;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // CLI args passed down to config
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (storage backend / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.storage.home_dir));
    tracing::info!("CarMarket starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => check_config(&config),
        command => run_command(&config, command),
    }
}

fn open_backend(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::File => {
            let dir = config.data_path();
            tracing::debug!("Using file store at {}", dir.display());
            Ok(Arc::new(FileStore::open(dir)?))
        }
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Public errors are reported on stderr and turned into the exit status;
/// anything else propagates to `main`.
fn run_command(config: &AppConfig, command: Commands) -> Result<ExitCode> {
    let module_config: CarMarketConfig = config.module_config("car_market")?;
    let market = CarMarket::new(open_backend(config)?, module_config);
    market
        .initialize()
        .map_err(|e| anyhow::anyhow!("failed to initialize store: {}", e))?;

    let mut session = market
        .auth()
        .restore_session()
        .map_err(|e| anyhow::anyhow!("failed to restore session: {}", e))?;

    match commands::execute(command, &market, &mut session) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match e.downcast_ref::<CarMarketError>() {
            Some(public) => {
                tracing::warn!(error = %public, "command failed");
                eprintln!("error: {}", public);
                Ok(ExitCode::from(u8::try_from(public.exit_code()).unwrap_or(1)))
            }
            None => Err(e),
        },
    }
}

fn check_config(config: &AppConfig) -> Result<ExitCode> {
    tracing::info!("Checking configuration...");

    // Module section must deserialize as well
    let _: CarMarketConfig = config.module_config("car_market")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(ExitCode::SUCCESS)
}
