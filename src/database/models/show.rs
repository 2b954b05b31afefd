use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A show joined with its (optional) watch row
#[derive(Debug, Clone, FromRow)]
pub struct ShowRow {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub rating: Option<i64>,
    pub watched_at: Option<DateTime<Utc>>,
}

/// API view of a show with its derived watch status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub watched: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watched_at: Option<DateTime<Utc>>,
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        // The CHECK constraint keeps stored ratings within 1..=5.
        let rating = row.rating.and_then(|r| u8::try_from(r).ok());
        Self {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
            watched: rating.is_some(),
            rating,
            watched_at: row.watched_at,
        }
    }
}
