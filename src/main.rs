use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cities_api::config::{self, StoreBackend};
use cities_api::server;

/// Geospatial city lookup service.
#[derive(Debug, Parser)]
#[command(name = "cities-api", version, about)]
struct Cli {
    /// Bind address (overrides LISTEN).
    #[arg(long)]
    listen: Option<String>,

    /// Store backend (overrides STORE_BACKEND).
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// PostgreSQL connection URL (overrides DATABASE_URL).
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(store) = cli.store {
        config.store_backend = store;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = Some(database_url);
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    server::run(config).await
}

fn init_tracing(config: &config::Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
