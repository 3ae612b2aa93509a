//! Database migrations
//!
//! Embedded, versioned schema migrations tracked in a `schema_version`
//! table. Rollbacks are manual: fix the issue, repair the database if
//! needed, re-run.

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version < SCHEMA_VERSION {
        info!(
            from_version = current_version,
            to_version = SCHEMA_VERSION,
            "Running database migrations"
        );

        if current_version < 1 {
            if let Err(e) = migrate_v1(conn) {
                error!(version = 1, error = %e, "Migration V001 (initial schema) failed");
                return Err(e);
            }
        }

        if current_version < 2 {
            if let Err(e) = migrate_v2(conn) {
                error!(version = 2, error = %e, "Migration V002 (sessions) failed");
                return Err(e);
            }
        }

        set_schema_version(conn, SCHEMA_VERSION)?;
        info!(version = SCHEMA_VERSION, "Database migrations complete");
    } else {
        debug!(version = current_version, "Database schema is up to date");
    }

    Ok(())
}

/// Get current schema version
fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Record the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// V001: users, campgrounds, images and reviews.
///
/// Foreign keys carry no ON DELETE clause: removing dependent rows is the
/// application's responsibility, the constraints only reject dangling
/// references.
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id            TEXT PRIMARY KEY,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS campgrounds (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            price       REAL NOT NULL CHECK (price >= 0),
            location    TEXT NOT NULL,
            longitude   REAL NOT NULL,
            latitude    REAL NOT NULL,
            author_id   TEXT NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_campgrounds_author
            ON campgrounds(author_id);

        CREATE TABLE IF NOT EXISTS campground_images (
            campground_id TEXT NOT NULL REFERENCES campgrounds(id),
            position      INTEGER NOT NULL,
            url           TEXT NOT NULL,
            filename      TEXT NOT NULL,
            PRIMARY KEY (campground_id, position)
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id            TEXT PRIMARY KEY,
            campground_id TEXT NOT NULL REFERENCES campgrounds(id),
            author_id     TEXT NOT NULL REFERENCES users(id),
            rating        INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            body          TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_reviews_campground
            ON reviews(campground_id);
        ",
    )?;
    Ok(())
}

/// V002: server-side session records with a last-write column for the
/// touch-after optimization.
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sessions (
            id          TEXT PRIMARY KEY,
            data        TEXT NOT NULL,
            expiry_date INTEGER NOT NULL,
            updated_at  INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_expiry
            ON sessions(expiry_date);
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_run_on_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn tables_exist_after_migration() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["users", "campgrounds", "campground_images", "reviews", "sessions"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }
}
