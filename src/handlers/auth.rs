use axum::{extract::State, http::HeaderMap, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{
    middleware::{bearer_token, AuthSession},
    password::{dummy_verify, hash_password, verify_password},
    session::SessionUser,
};
use crate::error::{AppError, AppResult};
use crate::models::user::{
    normalize_email, LoginRequest, LoginResponse, RegisterRequest, User, UserProfile,
};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    body.validate()?;

    let display_name = body.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::InvalidInput("Display name is required".into()));
    }
    if body.password.trim().is_empty() {
        return Err(AppError::InvalidInput("Password is required".into()));
    }

    let email = normalize_email(&body.email);
    if email.is_empty() {
        return Err(AppError::InvalidInput("Email is required".into()));
    }

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(&email)
        .fetch_one(&state.db)
        .await?;

    if existing > 0 {
        return Err(AppError::DuplicateIdentifier);
    }

    let pwd_hash = hash_password(&body.password)?;

    let inserted = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, display_name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(display_name)
    .bind(&email)
    .bind(&pwd_hash)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await;

    let user = match inserted {
        Ok(user) => user,
        // Backstop for a racing registration that slipped past the count
        // check; the unique index is the source of truth.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(AppError::DuplicateIdentifier)
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = %user.id, "Account created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = normalize_email(&body.email);

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    let Some(user) = user else {
        dummy_verify(&body.password);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&body.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.start(SessionUser {
        id: user.id,
        email: user.email.clone(),
        display_name: user.display_name.clone(),
    });

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// End the caller's session. Safe to call with a stale or missing token —
/// logging out twice is not an error.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.end(&token);
    }
    Json(serde_json::json!({ "message": "Logged out" }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> AppResult<Json<UserProfile>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(session.user.id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
