mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use pullboard_api::AppStateInner;
use pullboard_db::Database;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str =
    "pullboard_server=debug,pullboard_api=debug,pullboard_db=debug,pullboard_extract=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::open(&config.db_path)?;
    let http = pullboard_extract::build_client(config.fetch_timeout)?;

    if config.enable_wipe {
        warn!("DELETE /data is enabled; every table can be wiped over HTTP");
    }

    let state = Arc::new(AppStateInner {
        db,
        http,
        sources: config.sources.clone(),
    });

    let app = pullboard_api::router(state, config.enable_wipe)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Pullboard listening on {}", addr);
    info!(primary = %config.sources.primary, secondary = %config.sources.secondary, "Catalog sources");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
