//! Entry point: load config, wire dependencies, and run the server.

use ledgerauth::config::Config;
use ledgerauth::db::{self, AccountDirectory, MemoryAccountDirectory, PgAccountDirectory};
use ledgerauth::{build_state, create_app};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let directory: Arc<dyn AccountDirectory> = if config.database_url == "memory" {
        tracing::warn!("using in-memory account directory; data is lost on exit");
        Arc::new(MemoryAccountDirectory::new())
    } else {
        let pool = db::create_pool(&config.database_url).await?;
        Arc::new(PgAccountDirectory::new(pool))
    };

    let state = build_state(&config, directory).map_err(|e| anyhow::anyhow!("startup: {}", e))?;

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
