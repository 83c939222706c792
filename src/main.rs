//! Notifier gateway - Application entry point
//!
//! CLI-based entry point that dispatches to the available commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notifier_gateway::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    infra::DailyLogger,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {:?}", e);
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }
    tracing::debug!(?config, "Configuration loaded");

    // One logger instance for the whole process
    let logger = DailyLogger::new(config.log_dir.clone());

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config, logger.clone()).await,
    };

    // Handle errors
    if let Err(e) = result {
        logger.critical(format!("Command failed: {:?}", e));
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber writing to stderr
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
