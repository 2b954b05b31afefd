use chrono::Utc;
use tracing::{debug, info};

use crate::database::models::{Rating, Show, ShowRow, WatchFilter};
use crate::database::{DatabaseError, DatabaseManager};

const SELECT_SHOWS: &str = r#"
    SELECT s.id AS id, s.title AS title, s.created_at AS created_at,
           w.rating AS rating, w.watched_at AS watched_at
    FROM shows s
    LEFT JOIN watches w ON w.show_id = s.id
"#;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Show not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("Show with this title already exists")]
    DuplicateTitle,
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(DatabaseError::Sqlx(err))
    }
}

/// Show and watch persistence. Watch status is global, not per user.
#[derive(Debug, Clone)]
pub struct ShowService {
    db: DatabaseManager,
}

impl ShowService {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    pub async fn create_show(&self, title: &str) -> Result<Show, StoreError> {
        validate_title(title)?;

        let result = sqlx::query("INSERT INTO shows (title, created_at) VALUES (?, ?)")
            .bind(title)
            .bind(Utc::now())
            .execute(self.db.pool())
            .await
            .map_err(map_unique_violation)?;

        let id = result.last_insert_rowid();
        info!(show_id = id, title = %title, "Show created");
        self.get_show(id).await
    }

    /// All shows in id order, optionally narrowed to watched or unwatched.
    pub async fn list_shows(&self, filter: WatchFilter) -> Result<Vec<Show>, StoreError> {
        let sql = format!("{} {} ORDER BY s.id ASC", SELECT_SHOWS, filter.where_clause());
        let rows: Vec<ShowRow> = sqlx::query_as(&sql).fetch_all(self.db.pool()).await?;
        debug!(?filter, count = rows.len(), "Listed shows");
        Ok(rows.into_iter().map(Show::from).collect())
    }

    pub async fn get_show(&self, id: i64) -> Result<Show, StoreError> {
        let sql = format!("{} WHERE s.id = ?", SELECT_SHOWS);
        let row: Option<ShowRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        row.map(Show::from).ok_or(StoreError::NotFound)
    }

    /// Replace the title. `None` leaves the show untouched; `created_at` never changes.
    pub async fn update_show(&self, id: i64, title: Option<&str>) -> Result<Show, StoreError> {
        let existing = self.get_show(id).await?;
        let Some(title) = title else {
            return Ok(existing);
        };
        validate_title(title)?;

        sqlx::query("UPDATE shows SET title = ? WHERE id = ?")
            .bind(title)
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_unique_violation)?;

        info!(show_id = id, title = %title, "Show updated");
        self.get_show(id).await
    }

    /// Delete the show; its watch row goes with it via ON DELETE CASCADE.
    pub async fn delete_show(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM shows WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!(show_id = id, "Show deleted");
        Ok(())
    }

    /// Create or replace the single watch row for a show.
    pub async fn mark_watched(&self, show_id: i64, rating: i64) -> Result<(), StoreError> {
        let rating = Rating::new(rating).ok_or_else(|| {
            StoreError::Validation(format!(
                "Rating must be between {} and {}",
                Rating::MIN,
                Rating::MAX
            ))
        })?;
        self.ensure_show_exists(show_id).await?;

        sqlx::query(
            r#"
            INSERT INTO watches (show_id, rating, watched_at) VALUES (?, ?, ?)
            ON CONFLICT(show_id) DO UPDATE SET
                rating = excluded.rating,
                watched_at = excluded.watched_at
            "#,
        )
        .bind(show_id)
        .bind(i64::from(rating.get()))
        .bind(Utc::now())
        .execute(self.db.pool())
        .await
        .map_err(|e| match &e {
            // Show deleted between the existence check and the insert
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => StoreError::NotFound,
            _ => StoreError::from(e),
        })?;

        info!(show_id, %rating, "Show marked watched");
        Ok(())
    }

    /// Remove the watch row if any. Unwatching an unwatched show is not an error.
    pub async fn unmark_watched(&self, show_id: i64) -> Result<(), StoreError> {
        self.ensure_show_exists(show_id).await?;

        let result = sqlx::query("DELETE FROM watches WHERE show_id = ?")
            .bind(show_id)
            .execute(self.db.pool())
            .await?;

        info!(show_id, removed = result.rows_affected(), "Show marked unwatched");
        Ok(())
    }

    /// Globally watched shows. The same set is returned for every user.
    pub async fn list_watched_by_user(&self, username: &str) -> Result<Vec<Show>, StoreError> {
        debug!(user = %username, "Listing watched shows (global status)");
        self.list_shows(WatchFilter::Watched).await
    }

    /// Globally unwatched shows. The same set is returned for every user.
    pub async fn list_unwatched_by_user(&self, username: &str) -> Result<Vec<Show>, StoreError> {
        debug!(user = %username, "Listing unwatched shows (global status)");
        self.list_shows(WatchFilter::Unwatched).await
    }

    pub async fn count_shows(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    async fn ensure_show_exists(&self, id: i64) -> Result<(), StoreError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM shows WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        found.map(|_| ()).ok_or(StoreError::NotFound)
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("Title must not be empty".to_string()));
    }
    Ok(())
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateTitle,
        _ => StoreError::from(err),
    }
}
