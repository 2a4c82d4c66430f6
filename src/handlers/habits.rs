use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthSession;
use crate::error::{AppError, AppResult};
use crate::models::habit::{CreateHabitRequest, HabitEntry, SetDoneRequest};
use crate::AppState;

pub async fn add_habit(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<(StatusCode, Json<HabitEntry>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Habit name is required".into()));
    }

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let habit = sqlx::query_as::<_, HabitEntry>(
        r#"
        INSERT INTO habits (id, user_id, name, date, done, created_at)
        VALUES (?, ?, ?, ?, 0, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(session.user.id)
    .bind(name)
    .bind(date)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> AppResult<Json<Vec<HabitEntry>>> {
    let habits = sqlx::query_as::<_, HabitEntry>(
        r#"
        SELECT * FROM habits
        WHERE user_id = ?
        ORDER BY date DESC, created_at ASC
        "#,
    )
    .bind(session.user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(habits))
}

/// Flip the done flag. Scoping the update to the session's user is the
/// ownership check: someone else's habit id looks exactly like a missing one.
pub async fn set_done(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<SetDoneRequest>,
) -> AppResult<Json<HabitEntry>> {
    let habit = sqlx::query_as::<_, HabitEntry>(
        r#"
        UPDATE habits SET done = ?
        WHERE id = ? AND user_id = ?
        RETURNING *
        "#,
    )
    .bind(body.done)
    .bind(habit_id)
    .bind(session.user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Habit not found".into()))?;

    Ok(Json(habit))
}
