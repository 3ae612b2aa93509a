//! SQLite user store
//!
//! Unique-constraint violations on username or email surface as
//! `ApplicationError::Conflict` so the account service can report them
//! without parsing SQLite error strings itself.

use std::sync::Arc;

use application::{error::ApplicationError, ports::UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{EmailAddress, User, UserId, Username};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based user store
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserStore {
    /// Create a new SQLite user store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

fn internal(e: impl ToString) -> ApplicationError {
    ApplicationError::Internal(e.to_string())
}

fn map_insert_error(e: rusqlite::Error) -> ApplicationError {
    if let rusqlite::Error::SqliteFailure(inner, message) = &e {
        if inner.code == rusqlite::ErrorCode::ConstraintViolation {
            let field = message.as_deref().map_or("account", |m| {
                if m.contains("username") {
                    "username"
                } else if m.contains("email") {
                    "email"
                } else {
                    "account"
                }
            });
            return ApplicationError::Conflict(format!("{field} already taken"));
        }
    }
    internal(e)
}

/// Convert a database row to a `User`
fn row_to_user(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let username_str: String = row.get(1)?;
    let email_str: String = row.get(2)?;
    let password_hash: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    let conversion = |e: Box<dyn std::error::Error + Send + Sync>| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, e)
    };

    let id = UserId::parse(&id_str).map_err(|e| conversion(Box::new(e)))?;
    let username = Username::parse(&username_str).map_err(|e| conversion(Box::new(e)))?;
    let email = EmailAddress::parse(&email_str).map_err(|e| conversion(Box::new(e)))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(User::restore(id, username, email, password_hash, created_at))
}

#[async_trait]
impl UserStore for SqliteUserStore {
    #[instrument(skip(self, user), fields(id = %user.id()))]
    async fn save(&self, user: &User) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let user = user.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.execute(
                "INSERT INTO users (id, username, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id().to_string(),
                    user.username().as_str(),
                    user.email().as_str(),
                    user.password_hash(),
                    user.created_at().to_rfc3339(),
                ],
            )
            .map_err(map_insert_error)?;
            debug!("Saved user");
            Ok(())
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.query_row(
                "SELECT id, username, email, password_hash, created_at
                 FROM users WHERE id = ?1",
                [&id_str],
                row_to_user,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }

    #[instrument(skip(self), fields(username = %username))]
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let username_str = username.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(internal)?;
            conn.query_row(
                "SELECT id, username, email, password_hash, created_at
                 FROM users WHERE username = ?1",
                [&username_str],
                row_to_user,
            )
            .optional()
            .map_err(internal)
        })
        .await
        .map_err(internal)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_support::pool_with_schema;

    fn user(username: &str, email: &str) -> User {
        User::new(
            Username::parse(username).unwrap(),
            EmailAddress::parse(email).unwrap(),
            "$argon2id$stub".to_string(),
        )
    }

    #[tokio::test]
    async fn save_and_find_by_username() {
        let store = SqliteUserStore::new(pool_with_schema());
        let saved = user("camper", "camper@example.com");
        store.save(&saved).await.unwrap();

        let loaded = store
            .find_by_username(&Username::parse("camper").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id(), saved.id());
        assert_eq!(loaded.email().as_str(), "camper@example.com");
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let store = SqliteUserStore::new(pool_with_schema());
        store.save(&user("camper", "a@example.com")).await.unwrap();

        let result = store.save(&user("camper", "b@example.com")).await;
        match result {
            Err(ApplicationError::Conflict(msg)) => assert!(msg.contains("username")),
            other => unreachable!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = SqliteUserStore::new(pool_with_schema());
        store.save(&user("camper_a", "same@example.com")).await.unwrap();

        let result = store.save(&user("camper_b", "same@example.com")).await;
        match result {
            Err(ApplicationError::Conflict(msg)) => assert!(msg.contains("email")),
            other => unreachable!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = SqliteUserStore::new(pool_with_schema());
        assert!(store.get(UserId::new()).await.unwrap().is_none());
    }
}
