use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use pullboard_types::api::{RecordPullsRequest, RecordPullsResponse};
use pullboard_types::dates;

use crate::state::{AppState, with_db};

pub async fn by_date(
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let grouped = with_db(&state, move |db| db.pulls_by_date(&uid)).await?;
    Ok(Json(grouped))
}

/// Replace a user's pulls for one day. Without an explicit date the pulls
/// land on the scoring date, or the current UTC day when none is pinned.
/// An unparseable date is a 400 and leaves the store untouched.
pub async fn record(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(req): Json<RecordPullsRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let RecordPullsRequest { item_ids, date } = req;
    let response = with_db(&state, move |db| {
        let date = match date.as_deref() {
            Some(raw) => db.record_pulls_on(&uid, &item_ids, raw)?,
            None => {
                let date = db.schedule()?.scoring.unwrap_or_else(dates::today);
                db.record_pulls(&uid, &item_ids, date)?;
                date
            }
        };
        Ok(RecordPullsResponse {
            uid,
            date,
            count: item_ids.len(),
        })
    })
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::http::StatusCode;
    use chrono::{FixedOffset, NaiveDate, Utc};
    use serde_json::json;

    use pullboard_types::api::RecordPullsResponse;
    use pullboard_types::dates;
    use pullboard_types::models::ScheduleKind;

    use crate::test_support::{app, json, send, state};

    #[tokio::test]
    async fn second_submission_for_a_day_wins() {
        let state = state();
        let first = json!({ "item_ids": ["x", "y"], "date": "2024-01-01" });
        let second = json!({ "item_ids": ["z"], "date": "2024-01-01 18:00:00" });

        send(app(&state), "POST", "/pulls/u1", Some(first)).await;
        let (status, bytes) = send(app(&state), "POST", "/pulls/u1", Some(second)).await;
        assert_eq!(status, StatusCode::OK);
        let recorded: RecordPullsResponse = json(&bytes);
        assert_eq!(recorded.count, 1);

        let (_, bytes) = send(app(&state), "GET", "/pulls/u1", None).await;
        let grouped: BTreeMap<String, Vec<String>> = json(&bytes);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["2024-01-01"], vec!["z"]);
    }

    #[tokio::test]
    async fn missing_date_uses_the_scoring_date() {
        let state = state();
        let scoring = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        state.db.set_schedule_date(ScheduleKind::Scoring, scoring).unwrap();

        let body = json!({ "item_ids": ["x"] });
        let (_, bytes) = send(app(&state), "POST", "/pulls/u1", Some(body)).await;
        let recorded: RecordPullsResponse = json(&bytes);

        assert_eq!(recorded.date, scoring);
        assert_eq!(state.db.pulls_by_date("u1").unwrap()[&scoring], vec!["x"]);
    }

    #[tokio::test]
    async fn bad_date_is_a_client_error() {
        let state = state();
        let body = json!({ "item_ids": ["x"], "date": "next tuesday" });
        let (status, _) = send(app(&state), "POST", "/pulls/u1", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.db.pulls_by_date("u1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_date_keeps_the_days_already_recorded() {
        let state = state();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        state.db.record_pulls("u1", &["x".to_string()], day).unwrap();

        let body = json!({ "item_ids": ["y"], "date": "2024-01-01 25:00" });
        let (status, _) = send(app(&state), "POST", "/pulls/u1", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.db.pulls_by_date("u1").unwrap()[&day], vec!["x"]);
    }

    #[tokio::test]
    async fn offset_timestamp_and_missing_date_agree_on_today() {
        let state = state();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let submitted = Utc::now().with_timezone(&tokyo).to_rfc3339();

        let body = json!({ "item_ids": ["x"], "date": submitted });
        let (_, bytes) = send(app(&state), "POST", "/pulls/u1", Some(body)).await;
        let explicit: RecordPullsResponse = json(&bytes);

        let body = json!({ "item_ids": ["y"] });
        let (_, bytes) = send(app(&state), "POST", "/pulls/u2", Some(body)).await;
        let defaulted: RecordPullsResponse = json(&bytes);

        assert_eq!(explicit.date, defaulted.date);
        assert_eq!(defaulted.date, dates::today());
    }
}
