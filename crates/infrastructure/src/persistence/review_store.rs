//! SQLite review store

use std::sync::Arc;

use application::{error::ApplicationError, ports::ReviewStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CampgroundId, Rating, Review, ReviewId, UserId};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based review store
#[derive(Debug, Clone)]
pub struct SqliteReviewStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteReviewStore {
    /// Create a new SQLite review store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn internal(e: impl ToString) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

/// Convert a database row to a `Review`
fn row_to_review(row: &Row<'_>) -> Result<Review, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let campground_str: String = row.get(1)?;
    let author_str: String = row.get(2)?;
    let rating: i64 = row.get(3)?;
    let body: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    let conversion = |e: Box<dyn std::error::Error + Send + Sync>| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e)
    };

    let id = ReviewId::parse(&id_str).map_err(|e| conversion(Box::new(e)))?;
    let campground = CampgroundId::parse(&campground_str).map_err(|e| conversion(Box::new(e)))?;
    let author = UserId::parse(&author_str).map_err(|e| conversion(Box::new(e)))?;
    let rating = Rating::new(rating).map_err(|e| conversion(Box::new(e)))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(Review::restore(
        id, campground, author, rating, body, created_at,
    ))
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    #[instrument(skip(self, review), fields(id = %review.id()))]
    async fn save(&self, review: &Review) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let review = review.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.execute(
                "INSERT INTO reviews (id, campground_id, author_id, rating, body, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    review.id().to_string(),
                    review.campground().to_string(),
                    review.author().to_string(),
                    review.rating().value(),
                    review.body(),
                    review.created_at().to_rfc3339(),
                ],
            )
            .map_err(internal)?;
            debug!("Saved review");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: ReviewId) -> Result<Option<Review>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.query_row(
                "SELECT id, campground_id, author_id, rating, body, created_at
                 FROM reviews WHERE id = ?1",
                [&id_str],
                row_to_review,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    async fn list_for_campground(
        &self,
        campground: CampgroundId,
    ) -> Result<Vec<Review>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let campground_str = campground.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, campground_id, author_id, rating, body, created_at
                     FROM reviews WHERE campground_id = ?1
                     ORDER BY created_at, id",
                )
                .map_err(internal)?;
            let reviews = stmt
                .query_map([&campground_str], row_to_review)
                .map_err(internal)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(internal)?;
            Ok(reviews)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ReviewId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let deleted = conn
                .execute("DELETE FROM reviews WHERE id = ?1", [&id_str])
                .map_err(internal)?;
            debug!(deleted = deleted > 0, "Deleted review");
            Ok(deleted > 0)
        })
        .await
        .map_err(internal)?
    }

    async fn delete_for_campground(
        &self,
        campground: CampgroundId,
    ) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let campground_str = campground.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let deleted = conn
                .execute(
                    "DELETE FROM reviews WHERE campground_id = ?1",
                    [&campground_str],
                )
                .map_err(internal)?;
            debug!(deleted, "Deleted campground reviews");
            Ok(deleted)
        })
        .await
        .map_err(internal)?
    }

    async fn delete_all(&self) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.execute("DELETE FROM reviews", []).map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}
