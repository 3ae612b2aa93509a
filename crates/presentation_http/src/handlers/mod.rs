//! Resource handlers
//!
//! Thin by contract: each handler may assume sanitized input and an
//! attached (possibly absent) current user, and must render a view, issue
//! a redirect, or return a `PageError` for the terminal error stage.

pub mod campgrounds;
pub mod forms;
pub mod pages;
pub mod reviews;
pub mod users;

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::context::CurrentUser;
use crate::flash;

/// Session key holding the path to return to after login
pub const RETURN_TO_KEY: &str = "return_to";

/// Require an authenticated user.
///
/// Anonymous requests are answered with a flash notice and a redirect to
/// the login page, remembering where they were headed.
pub(crate) async fn require_login(
    session: &Session,
    user: Option<CurrentUser>,
    return_to: &str,
) -> Result<CurrentUser, Response> {
    if let Some(user) = user {
        return Ok(user);
    }

    let redirect = async {
        session
            .insert(RETURN_TO_KEY, return_to.to_string())
            .await
            .map_err(|e| crate::error::PageError::internal(format!("session store: {e}")))?;
        flash::error(session, "You must be signed in first!").await?;
        Ok::<_, crate::error::PageError>(Redirect::to("/login").into_response())
    };

    match redirect.await {
        Ok(response) => Err(response),
        Err(page_error) => Err(page_error.into_response()),
    }
}
