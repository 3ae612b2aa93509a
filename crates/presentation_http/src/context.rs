//! Per-request rendering context
//!
//! Replaces the "attach arbitrary fields to the request" pattern with an
//! explicit structure: the authenticated user (if any) plus the one-shot
//! flash arrays, assembled once per rendered page. Extraction takes the
//! flash messages out of the session, so only handlers that actually
//! render a page should use [`PageContext`]; redirecting handlers work
//! with the [`tower_sessions::Session`] directly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use domain::UserId;
use infrastructure::ViewContext;
use serde::Serialize;
use tower_sessions::Session;

use crate::error::PageError;
use crate::flash::{self, FlashMessages};

/// Session key holding the authenticated user's id
pub const USER_ID_KEY: &str = "user_id";

/// The authenticated user attached to the request by the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    /// User id
    pub id: UserId,
    /// Display name
    pub username: String,
}

/// Explicit per-request view context
#[derive(Debug)]
pub struct PageContext {
    /// Authenticated user, absent for anonymous requests
    pub current_user: Option<CurrentUser>,
    /// Flash messages consumed from the session
    pub flash: FlashMessages,
}

impl PageContext {
    /// Start a template context carrying the cross-page values
    #[must_use]
    pub fn view(&self) -> ViewContext {
        let mut ctx = ViewContext::new();
        ctx.insert("current_user", &self.current_user);
        ctx.insert("success", &self.flash.success);
        ctx.insert("error", &self.flash.error);
        ctx
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| PageError::internal(msg))?;

        let current_user = parts.extensions.get::<CurrentUser>().cloned();
        let flash = flash::take(&session).await?;

        Ok(Self {
            current_user,
            flash,
        })
    }
}
