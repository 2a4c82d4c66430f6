use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::middleware::AuthSession;
use crate::error::{AppError, AppResult};
use crate::models::mood::{
    ListMoodsQuery, MoodEntry, MoodLabel, RecordMoodRequest, SortOrder,
};
use crate::AppState;

pub async fn record_mood(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(body): Json<RecordMoodRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    let label = body.label.trim();
    if label.is_empty() {
        return Err(AppError::InvalidInput("Mood label is required".into()));
    }
    let Some(label) = MoodLabel::parse(label) else {
        return Err(AppError::InvalidInput(format!(
            "Unrecognized mood label: {}",
            label
        )));
    };

    // Timestamp is assigned here rather than in SQL so consecutive entries
    // stay strictly ordered even within the same second.
    let entry = sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO moods (id, user_id, label, note, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session.user.id)
    .bind(label.as_str())
    .bind(&body.note)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(query): Query<ListMoodsQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let order = query.order.unwrap_or_default();
    let entries = fetch_moods(&state.db, session.user.id, order).await?;
    Ok(Json(entries))
}

pub async fn export_moods(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> AppResult<impl IntoResponse> {
    let entries = fetch_moods(&state.db, session.user.id, SortOrder::Asc).await?;
    let body = moods_to_csv(&entries).map_err(AppError::Internal)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"moods.csv\"",
            ),
        ],
        body,
    ))
}

async fn fetch_moods(
    db: &SqlitePool,
    user_id: Uuid,
    order: SortOrder,
) -> Result<Vec<MoodEntry>, sqlx::Error> {
    // rowid breaks ties between entries that share a timestamp, keeping the
    // sequence in insert order either way.
    let sql = match order {
        SortOrder::Asc => {
            "SELECT * FROM moods WHERE user_id = ? ORDER BY created_at ASC, rowid ASC"
        }
        SortOrder::Desc => {
            "SELECT * FROM moods WHERE user_id = ? ORDER BY created_at DESC, rowid DESC"
        }
    };

    sqlx::query_as::<_, MoodEntry>(sql)
        .bind(user_id)
        .fetch_all(db)
        .await
}

/// Serialize entries as `mood,notes,created_at` CSV. The writer applies
/// RFC-4180 quoting, so labels and notes may contain commas, quotes, or
/// newlines.
fn moods_to_csv(entries: &[MoodEntry]) -> Result<Vec<u8>, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["mood", "notes", "created_at"])?;
    for entry in entries {
        writer.write_record([
            entry.label.as_str(),
            entry.note.as_deref().unwrap_or(""),
            &entry.created_at.to_rfc3339(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv writer failed: {}", e))
}
