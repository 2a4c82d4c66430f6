use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::middleware::AuthSession;
use crate::error::AppResult;
use crate::models::mood::mood_score;
use crate::AppState;

/// Aggregates the charting layer consumes: how often each mood occurs, and
/// the mood-over-time projection onto the ordinal scale.
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub frequency: Vec<MoodFrequency>,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Serialize)]
pub struct MoodFrequency {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct TimelinePoint {
    pub recorded_at: DateTime<Utc>,
    pub score: i64,
}

pub async fn get_insights(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> AppResult<Json<InsightsResponse>> {
    let frequency = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT label, COUNT(*) AS count
        FROM moods
        WHERE user_id = ?
        GROUP BY label
        ORDER BY count DESC, label ASC
        "#,
    )
    .bind(session.user.id)
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(label, count)| MoodFrequency { label, count })
    .collect();

    let timeline = sqlx::query_as::<_, (String, DateTime<Utc>)>(
        r#"
        SELECT label, created_at
        FROM moods
        WHERE user_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(session.user.id)
    .fetch_all(&state.db)
    .await?
    .into_iter()
    .map(|(label, recorded_at)| TimelinePoint {
        recorded_at,
        // Unrecognized legacy labels land on the sentinel, never an error.
        score: mood_score(&label),
    })
    .collect();

    Ok(Json(InsightsResponse {
        frequency,
        timeline,
    }))
}
