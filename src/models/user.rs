use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The shape handed to callers — everything but the hash.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            display_name: u.display_name,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

// Length caps guard against oversized payloads; the required "non-empty
// after trimming" checks live in the handler because they run post-trim.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "Display name too long"))]
    pub display_name: String,
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,
    #[validate(length(max = 128, message = "Password too long"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: UserProfile,
}

/// Canonical form of an email for uniqueness and lookups.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
