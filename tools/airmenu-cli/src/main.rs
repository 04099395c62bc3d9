//! AirMenu CLI: drive the touchless kiosk without a camera.
//!
//! Usage:
//!   airmenu replay <SCRIPT>      Run a hand script headless on its own timeline
//!   airmenu simulate <SCRIPT>    Run a hand script in real time
//!   airmenu menu                 Print the catalog in the web API shape
//!   airmenu config [--init]      Show or initialize the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use airmenu_common::config::{config_file_path, AppConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "airmenu",
    about = "Touchless gesture-driven restaurant kiosk",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a hand script as fast as possible
    Replay {
        /// JSONL hand script
        script: PathBuf,

        /// Catalog JSON to use instead of the built-in menu
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Frame rate override
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Run a hand script in real time through the provider task
    Simulate {
        /// JSONL hand script
        script: PathBuf,

        /// Catalog JSON to use instead of the built-in menu
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the menu as served by the web API
    Menu {
        /// Catalog JSON to use instead of the built-in menu
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let init = matches!(cli.command, Commands::Config { init: true });
    let loaded = match &cli.config {
        Some(path) if !init => Ok(AppConfig::load_from(path)?),
        Some(path) => AppConfig::load_at(path),
        None => AppConfig::load(),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    airmenu_common::logging::init_logging(&config.logging);

    let config_path = cli.config.clone().unwrap_or_else(config_file_path);
    match load_error {
        Some(e) => tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
        None => tracing::debug!(path = %config_path.display(), "Configuration loaded"),
    }

    match cli.command {
        Commands::Replay {
            script,
            catalog,
            fps,
        } => {
            if let Some(fps) = fps {
                config.display.fps = fps;
                config.validate()?;
            }
            commands::replay::run(config, script, catalog)
        }
        Commands::Simulate { script, catalog } => {
            commands::simulate::run(config, script, catalog).await
        }
        Commands::Menu { catalog } => commands::menu::run(&config, catalog),
        Commands::Config { init } => commands::config::run(&config, cli.config, init),
    }
}
