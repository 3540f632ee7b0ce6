//! ReelPick CLI
//!
//! Pick clips for a video task from short muted previews, and apply fade or
//! slide transitions through FFmpeg.
//!
//! # Usage
//!
//! ```bash
//! reelpick session start --task demo --terms city,night
//! reelpick session toggle --task demo --index 2
//! reelpick session confirm --task demo
//! reelpick transition --input in.mp4 --output out.mp4 --kind slide-in --duration 1 --side left
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use reelpick_cli::app::DefaultAppContainer;
use reelpick_cli::cli::{commands, Cli, Commands};
use reelpick_cli::config_initialization::initialize_configuration_hierarchy;
use reelpick_cli::utils::logging::init_logging;

/// Main entry point for the ReelPick CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    init_logging(&config.logging)?;
    info!("Starting ReelPick");

    if let Commands::Config = cli.command {
        return commands::show_config(&config);
    }

    let container = DefaultAppContainer::new(&config)?;

    // Execute the requested command
    match cli.command {
        Commands::Preview(args) => commands::preview(&container, args).await?,
        Commands::Transition(args) => commands::transition(&container, args).await?,
        Commands::Session(command) => commands::session(&container, &config, command).await?,
        Commands::Config => {}
    }

    info!("ReelPick completed successfully");
    Ok(())
}
