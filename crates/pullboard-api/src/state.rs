use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{error, warn};

use pullboard_db::{Database, StoreError};
use pullboard_extract::SourceUrls;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub http: reqwest::Client,
    pub sources: SourceUrls,
}

/// Run a store operation off the async runtime. A date the store refused to
/// parse is the caller's fault (400); every other store failure is a 500.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&Database) -> pullboard_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| match e {
            StoreError::InvalidDate(_) => {
                warn!("Rejected request: {}", e);
                StatusCode::BAD_REQUEST
            }
            _ => {
                error!("Store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })
}
