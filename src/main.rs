mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use mclogs_uploader::config::Config;
use mclogs_uploader::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    observability::init_tracing(&config.telemetry.log_filter);

    match cli.command {
        Commands::Upload(args) => {
            if !commands::upload(&config, args).await? {
                std::process::exit(1);
            }
        }
        Commands::Check(args) => commands::check(args),
    }

    Ok(())
}
