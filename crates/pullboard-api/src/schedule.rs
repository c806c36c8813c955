use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use pullboard_types::api::UpdateScheduleRequest;
use pullboard_types::dates::parse_calendar_date;

use crate::state::{AppState, with_db};

pub async fn get_schedule(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let schedule = with_db(&state, |db| db.schedule()).await?;
    Ok(Json(schedule))
}

pub async fn update_schedule(
    State(state): State<AppState>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let date = parse_calendar_date(&req.date).map_err(|e| {
        warn!("Rejected schedule update: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let schedule = with_db(&state, move |db| {
        db.set_schedule_date(req.kind, date)?;
        db.schedule()
    })
    .await?;

    Ok(Json(schedule))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use serde_json::json;

    use pullboard_types::models::Schedule;

    use crate::test_support::{app, json, send, state};

    #[tokio::test]
    async fn update_then_read_back() {
        let state = state();
        let body = json!({ "kind": "opening", "date": "2024-05-01" });
        let (status, bytes) = send(app(&state), "PUT", "/schedule", Some(body)).await;
        assert_eq!(status, StatusCode::OK);

        let updated: Schedule = json(&bytes);
        assert_eq!(updated.opening, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(updated.scoring, None);

        let (_, bytes) = send(app(&state), "GET", "/schedule", None).await;
        assert_eq!(json::<Schedule>(&bytes), updated);
    }

    #[tokio::test]
    async fn unknown_kind_is_rejected() {
        let state = state();
        let body = json!({ "kind": "closing", "date": "2024-05-01" });
        let (status, _) = send(app(&state), "PUT", "/schedule", Some(body)).await;
        assert!(status.is_client_error());
    }
}
