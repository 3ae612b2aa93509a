//! SQLite campground store
//!
//! Implements the `CampgroundStore` port. Image references are part of
//! the campground aggregate and live in a companion table that is
//! rewritten on every save.

use std::sync::Arc;

use application::{error::ApplicationError, ports::CampgroundStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Campground, CampgroundId, GeoPoint, ImageRef, Price, UserId};
use rusqlite::{Connection, OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based campground store
#[derive(Debug, Clone)]
pub struct SqliteCampgroundStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteCampgroundStore {
    /// Create a new SQLite campground store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn internal(e: impl ToString) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

fn load_images(conn: &Connection, id: &str) -> Result<Vec<ImageRef>, ApplicationError> {
    let mut stmt = conn
        .prepare(
            "SELECT url, filename FROM campground_images
             WHERE campground_id = ?1 ORDER BY position",
        )
        .map_err(internal)?;
    let images = stmt
        .query_map([id], |row| {
            Ok(ImageRef::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })
        .map_err(internal)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;
    Ok(images)
}

const SELECT_COLUMNS: &str = "id, title, description, price, location, longitude, latitude, \
                              author_id, created_at";

#[async_trait]
impl CampgroundStore for SqliteCampgroundStore {
    #[instrument(skip(self, campground), fields(id = %campground.id()))]
    async fn save(&self, campground: &Campground) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let campground = campground.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(internal)?;
            let tx = conn.transaction().map_err(internal)?;
            let id = campground.id().to_string();

            // The author column is only written on insert; the upsert
            // clause deliberately leaves it out.
            tx.execute(
                "INSERT INTO campgrounds
                     (id, title, description, price, location, longitude, latitude,
                      author_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(id) DO UPDATE SET
                     title = excluded.title,
                     description = excluded.description,
                     price = excluded.price,
                     location = excluded.location,
                     longitude = excluded.longitude,
                     latitude = excluded.latitude",
                params![
                    id,
                    campground.title(),
                    campground.description(),
                    campground.price().value(),
                    campground.location(),
                    campground.geometry().longitude(),
                    campground.geometry().latitude(),
                    campground.author().to_string(),
                    campground.created_at().to_rfc3339(),
                ],
            )
            .map_err(internal)?;

            tx.execute(
                "DELETE FROM campground_images WHERE campground_id = ?1",
                [&id],
            )
            .map_err(internal)?;
            for (position, image) in campground.images().iter().enumerate() {
                tx.execute(
                    "INSERT INTO campground_images (campground_id, position, url, filename)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![id, position as i64, image.url, image.filename],
                )
                .map_err(internal)?;
            }

            tx.commit().map_err(internal)?;
            debug!("Saved campground");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: CampgroundId) -> Result<Option<Campground>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;

            let row = conn
                .query_row(
                    &format!("SELECT {SELECT_COLUMNS} FROM campgrounds WHERE id = ?1"),
                    [&id_str],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, f64>(3)?,
                            row.get::<_, String>(4)?,
                            row.get::<_, f64>(5)?,
                            row.get::<_, f64>(6)?,
                            row.get::<_, String>(7)?,
                            row.get::<_, String>(8)?,
                        ))
                    },
                )
                .optional()
                .map_err(internal)?;

            match row {
                None => Ok(None),
                Some(raw) => {
                    let images = load_images(&conn, &id_str)?;
                    Ok(Some(raw_to_campground(raw, images)?))
                },
            }
        })
        .await
        .map_err(internal)?
    }

    async fn list(&self) -> Result<Vec<Campground>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM campgrounds ORDER BY created_at DESC, id"
                ))
                .map_err(internal)?;

            let raws = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, f64>(5)?,
                        row.get::<_, f64>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, String>(8)?,
                    ))
                })
                .map_err(internal)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(internal)?;

            let mut campgrounds = Vec::with_capacity(raws.len());
            for raw in raws {
                let images = load_images(&conn, &raw.0)?;
                campgrounds.push(raw_to_campground(raw, images)?);
            }
            Ok(campgrounds)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: CampgroundId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(internal)?;
            let tx = conn.transaction().map_err(internal)?;
            tx.execute(
                "DELETE FROM campground_images WHERE campground_id = ?1",
                [&id_str],
            )
            .map_err(internal)?;
            let deleted = tx
                .execute("DELETE FROM campgrounds WHERE id = ?1", [&id_str])
                .map_err(internal)?;
            tx.commit().map_err(internal)?;
            debug!(deleted = deleted > 0, "Deleted campground");
            Ok(deleted > 0)
        })
        .await
        .map_err(internal)?
    }

    async fn delete_all(&self) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(internal)?;
            let tx = conn.transaction().map_err(internal)?;
            tx.execute("DELETE FROM campground_images", [])
                .map_err(internal)?;
            let deleted = tx.execute("DELETE FROM campgrounds", []).map_err(internal)?;
            tx.commit().map_err(internal)?;
            Ok(deleted)
        })
        .await
        .map_err(internal)?
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM campgrounds", [], |row| row.get(0))
                .map_err(internal)?;
            Ok(count.unsigned_abs())
        })
        .await
        .map_err(internal)?
    }
}

type RawRow = (
    String,
    String,
    String,
    f64,
    String,
    f64,
    f64,
    String,
    String,
);

fn raw_to_campground(raw: RawRow, images: Vec<ImageRef>) -> Result<Campground, ApplicationError> {
    let (id, title, description, price, location, longitude, latitude, author, created_at) = raw;

    Ok(Campground::restore(
        CampgroundId::parse(&id).map_err(internal)?,
        title,
        description,
        Price::new(price)?,
        location,
        GeoPoint::new(longitude, latitude)?,
        images,
        UserId::parse(&author).map_err(internal)?,
        DateTime::parse_from_rfc3339(&created_at)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc)),
    ))
}
