use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use squadlist::{Config, Store, SyncService};

mod commands;

use commands::{AddCommand, ConfigCommand, ListCommand, RemoveCommand, StatusCommand};

#[derive(Parser)]
#[command(name = "squad")]
#[command(version)]
#[command(about = "A roster list CLI backed by a remote collection", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and show the roster
    List(ListCommand),

    /// Add a new item to the roster
    Add(AddCommand),

    /// Mark an item completed
    Done(StatusCommand),

    /// Mark an item not completed
    Undone(StatusCommand),

    /// Delete an item from the roster
    Remove(RemoveCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squadlist=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::List(cmd)) => cmd.run(&service(&config)).await,
        Some(Commands::Add(cmd)) => cmd.run(&service(&config)).await,
        Some(Commands::Done(cmd)) => cmd.run(&service(&config), true).await,
        Some(Commands::Undone(cmd)) => cmd.run(&service(&config), false).await,
        Some(Commands::Remove(cmd)) => cmd.run(&service(&config)).await,
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}

fn service(config: &Config) -> SyncService {
    SyncService::new(config.api_url.clone(), Arc::new(Store::new()))
}
