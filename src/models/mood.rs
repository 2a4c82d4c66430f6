use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded mood. Entries are append-only: no update or delete exists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    // Stored as text so rows written by older free-text clients still load;
    // new entries are validated against `MoodLabel` on the way in.
    pub label: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The fixed set of recordable moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodLabel {
    Happy,
    Calm,
    Neutral,
    Anxious,
    Sad,
    Angry,
}

/// Ordinal score for a label the scale does not know. Sits below every
/// real mood so unrecognized legacy labels chart at the bottom, never error.
pub const UNKNOWN_MOOD_SCORE: i64 = 0;

impl MoodLabel {
    pub const ALL: [MoodLabel; 6] = [
        MoodLabel::Happy,
        MoodLabel::Calm,
        MoodLabel::Neutral,
        MoodLabel::Anxious,
        MoodLabel::Sad,
        MoodLabel::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "😃 Happy",
            MoodLabel::Calm => "🙂 Calm",
            MoodLabel::Neutral => "😐 Neutral",
            MoodLabel::Anxious => "😟 Anxious",
            MoodLabel::Sad => "😢 Sad",
            MoodLabel::Angry => "😡 Angry",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.as_str() == s)
    }

    /// Position on the wellbeing scale used by the timeline view.
    pub fn score(&self) -> i64 {
        match self {
            MoodLabel::Happy => 6,
            MoodLabel::Calm => 5,
            MoodLabel::Neutral => 4,
            MoodLabel::Anxious => 3,
            MoodLabel::Sad => 2,
            MoodLabel::Angry => 1,
        }
    }
}

/// Project any stored label onto the ordinal scale.
pub fn mood_score(label: &str) -> i64 {
    MoodLabel::parse(label)
        .map(|l| l.score())
        .unwrap_or(UNKNOWN_MOOD_SCORE)
}

#[derive(Debug, Deserialize)]
pub struct RecordMoodRequest {
    pub label: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Deserialize)]
pub struct ListMoodsQuery {
    pub order: Option<SortOrder>,
}
