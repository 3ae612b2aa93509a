//! User persistence port

use async_trait::async_trait;
use domain::{User, UserId, Username};

use crate::error::ApplicationError;

/// Persistence operations for user accounts
///
/// `save` must fail with [`ApplicationError::Conflict`] when the username
/// or email collides with an existing account.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user
    async fn save(&self, user: &User) -> Result<(), ApplicationError>;

    /// Fetch a user by ID
    async fn get(&self, id: UserId) -> Result<Option<User>, ApplicationError>;

    /// Fetch a user by username
    async fn find_by_username(&self, username: &Username)
    -> Result<Option<User>, ApplicationError>;
}
