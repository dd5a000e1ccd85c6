use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use school_registry::config;
use school_registry::database;
use school_registry::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    school_registry::init_tracing();

    let config = config::config();
    info!("Starting School Registry API in {:?} mode", config.environment);

    let store = database::open_store(&config.database)
        .await
        .context("failed to open school store")?;
    let app = server::app(AppState::from_arc(store), config);

    let bind_addr = config.api.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("School Registry API listening on http://{}", bind_addr);
    server::serve(listener, app).await?;
    Ok(())
}
