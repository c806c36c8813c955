use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use pullboard_types::api::{AssignScoresRequest, AssignScoresResponse};

use crate::state::{AppState, with_db};

pub async fn report(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let report = with_db(&state, |db| db.score_report()).await?;
    Ok(Json(report))
}

/// Assign a score and answer with the report as it stands afterwards,
/// plus the evicted holders and any ids the ledger does not know.
pub async fn assign(
    State(state): State<AppState>,
    Json(req): Json<AssignScoresRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let response = with_db(&state, move |db| {
        let outcome = db.assign_score(&req.item_ids, req.score)?;
        Ok(AssignScoresResponse {
            report: db.score_report()?,
            evicted: outcome.evicted,
            unknown: outcome.unknown,
        })
    })
    .await?;

    Ok(Json(response))
}
