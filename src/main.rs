//! Bestiary HTTP server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bestiary::server::{router, AppState};
use bestiary::{BestiaryResult, Config, MemoryStore, SpeciesStore};

#[derive(Parser)]
#[command(name = "bestiary")]
#[command(about = "Incremental species-directory search server", long_about = None)]
struct Cli {
    /// Path to a config file (default: <config dir>/bestiary/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address, overriding the config (e.g. '0.0.0.0:8080')
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,

    /// JSON dataset to serve, overriding the config
    #[arg(long, value_name = "FILE")]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> BestiaryResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bestiary=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let dataset = cli.dataset.or_else(|| config.server.dataset.clone());
    let store: Arc<dyn SpeciesStore> = match dataset {
        Some(path) => {
            let store = MemoryStore::from_json_file(&path)?;
            info!(path = %path.display(), records = store.len(), "loaded dataset");
            Arc::new(store)
        }
        None => {
            let store = MemoryStore::sample();
            info!(records = store.len(), "using bundled sample dataset");
            Arc::new(store)
        }
    };

    let addr = cli
        .listen
        .unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
    let app = router(AppState {
        store,
        search: config.search.clone(),
    });

    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
