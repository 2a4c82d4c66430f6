use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::session::SessionUser;
use crate::error::AppError;
use crate::AppState;

/// The authenticated caller, injected as a request extension by
/// [`require_auth`]. Carries the token so handlers can end the session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: Uuid,
    pub user: SessionUser,
}

/// Pull the bearer token out of the Authorization header, if it parses.
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let raw = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(raw.trim()).ok()
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthenticated)?;

    let user = state
        .sessions
        .current(&token)
        .ok_or(AppError::Unauthenticated)?;

    req.extensions_mut().insert(AuthSession { token, user });
    Ok(next.run(req).await)
}
