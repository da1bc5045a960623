//! `arc` CLI entry point.

use clap::Parser;

use retainer_control::cli::{commands, handle_error, Cli, Commands};
use retainer_control::infrastructure::config::ConfigLoader;
use retainer_control::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Sync(args) => commands::sync::execute(args, &config, cli.json).await,
        Commands::NextVenture(args) => commands::venture::execute(args, &config, cli.json).await,
        Commands::List(args) => commands::list::execute(args, &config, cli.json).await,
        Commands::Group(args) => commands::group::execute(args, &config, cli.json).await,
        Commands::Character(args) => commands::character::execute(args, &config, cli.json).await,
        Commands::LockedItems(args) => {
            commands::locked_items::execute(args, &config, cli.json).await
        }
        Commands::Config(args) => commands::config::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        tracing::error!(error = %format!("{err:#}"), "command failed");
        handle_error(err, cli.json);
    }
}
