//! Account service
//!
//! Registration and credential verification. Passwords are hashed through
//! the `PasswordHasher` port before they reach the store.

use std::fmt;
use std::sync::Arc;

use domain::{DomainError, EmailAddress, User, UserId, Username};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{PasswordHasher, UserStore};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Service for user accounts
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Create a new account service
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new account and return it
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ApplicationError> {
        let username = Username::parse(username)?;
        let email = EmailAddress::parse(email)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(username, email, password_hash);
        self.users.save(&user).await?;
        info!(id = %user.id(), "User registered");
        Ok(user)
    }

    /// Verify login credentials, returning the user on success
    ///
    /// Returns `Ok(None)` for an unknown username or a wrong password; the
    /// two cases are indistinguishable to the caller.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApplicationError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };
        let Some(user) = self.users.find_by_username(&username).await? else {
            debug!("Unknown username");
            return Ok(None);
        };

        if self.hasher.verify(password, user.password_hash())? {
            Ok(Some(user))
        } else {
            debug!("Password mismatch");
            Ok(None)
        }
    }

    /// Fetch a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, ApplicationError> {
        self.users.get(id).await
    }
}
