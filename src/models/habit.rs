use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HabitEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    // The only mutable field; everything else is fixed at creation.
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    // Defaults to today when omitted.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SetDoneRequest {
    pub done: bool,
}
