use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::state::{AppState, with_db};

/// Lifetime totals, highest first.
pub async fn totals(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let mut totals = with_db(&state, |db| db.total_per_user()).await?;
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(Json(totals))
}

pub async fn daily(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let series = with_db(&state, |db| db.daily_per_user_until_now()).await?;
    Ok(Json(series))
}
