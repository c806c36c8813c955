use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use pullboard_extract::{FetchedCatalog, fetch_catalog};
use pullboard_types::api::RefreshResponse;

use crate::state::{AppState, with_db};

pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let items = with_db(&state, |db| db.fetch_all_items()).await?;
    Ok(Json(items))
}

/// Fetch both source tables and resync the catalog. Nothing is written
/// unless both pages were fetched and extracted cleanly.
pub async fn refresh(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let FetchedCatalog {
        items,
        primary,
        secondary,
    } = fetch_catalog(&state.http, &state.sources)
        .await
        .map_err(|e| {
            error!("Catalog refresh aborted: {}", e);
            StatusCode::BAD_GATEWAY
        })?;

    let stored = with_db(&state, move |db| {
        db.refresh_catalog(&items)?;
        db.item_count()
    })
    .await?;

    Ok(Json(RefreshResponse {
        primary,
        secondary,
        total: primary + secondary,
        stored,
    }))
}
