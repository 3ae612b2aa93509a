//! Authentication-context middleware
//!
//! Deserializes the session's stored identity into a request-scoped
//! [`CurrentUser`] extension. Relies on the session layer having run
//! first; handlers and the page context read the extension instead of
//! touching the session themselves.
//!
//! A store failure here downgrades the request to anonymous rather than
//! failing it: public pages stay readable while the store is unhealthy,
//! and any handler that actually needs the store will surface the error.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::ports::UserStore;
use axum::{extract::Request, response::Response};
use domain::UserId;
use tower::{Layer, Service};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::context::{CurrentUser, USER_ID_KEY};

/// Layer that attaches the authenticated user to requests
#[derive(Clone)]
pub struct CurrentUserLayer {
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for CurrentUserLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUserLayer").finish_non_exhaustive()
    }
}

impl CurrentUserLayer {
    /// Create a new layer backed by the given user store
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

impl<S> Layer<S> for CurrentUserLayer {
    type Service = CurrentUserService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CurrentUserService {
            inner,
            users: Arc::clone(&self.users),
        }
    }
}

/// Middleware service resolving the session identity to a user
#[derive(Clone)]
pub struct CurrentUserService<S> {
    inner: S,
    users: Arc<dyn UserStore>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for CurrentUserService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUserService")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Resolve the session's stored user id, if any, to a `CurrentUser`
async fn resolve_user(session: &Session, users: &Arc<dyn UserStore>) -> Option<CurrentUser> {
    let stored: Option<String> = match session.get(USER_ID_KEY).await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Session read failed, treating request as anonymous");
            return None;
        },
    };
    let stored = stored?;

    let Ok(user_id) = UserId::parse(&stored) else {
        warn!("Session carries an unparseable user id, ignoring");
        return None;
    };

    match users.get(user_id).await {
        Ok(Some(user)) => Some(CurrentUser {
            id: user.id(),
            username: user.username().to_string(),
        }),
        Ok(None) => {
            debug!(%user_id, "Session user no longer exists");
            None
        },
        Err(e) => {
            warn!(error = %e, "User lookup failed, treating request as anonymous");
            None
        },
    }
}

impl<S> Service<Request> for CurrentUserService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let users = Arc::clone(&self.users);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if let Some(session) = req.extensions().get::<Session>().cloned() {
                if let Some(current_user) = resolve_user(&session, &users).await {
                    req.extensions_mut().insert(current_user);
                }
            }
            inner.call(req).await
        })
    }
}
