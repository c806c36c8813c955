use axum::{extract::State, http::StatusCode};
use tracing::warn;

use crate::state::{AppState, with_db};

/// DELETE /data: drop every row of every table. Development use only.
pub async fn wipe(State(state): State<AppState>) -> Result<StatusCode, StatusCode> {
    warn!("Wiping all data on request");
    with_db(&state, |db| db.wipe_all()).await?;
    Ok(StatusCode::NO_CONTENT)
}
