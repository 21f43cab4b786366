use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use pizzeria_store::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod models;

use config::Config;
use handlers::{app, AppState};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Overrides DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
        /// Overrides LISTEN_ADDR
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// Apply pending migrations and exit
    Migrate {
        /// Overrides DATABASE_URL
        #[arg(long)]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            database_url,
            listen,
        } => serve(Config::from_env()?.with_overrides(database_url, listen)).await,
        Commands::Migrate { database_url } => {
            let config = Config::from_env()?.with_overrides(database_url, None);
            Store::connect(&config.database_url)?.migrate().await?;
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::connect(&config.database_url)?;
    store.migrate().await?;
    info!("Using database {}", config.database_url);

    let app = app(AppState { store });

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Pizzeria API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
