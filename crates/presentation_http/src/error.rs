//! Page error handling
//!
//! Every handler and the not-found fallback return a [`PageError`]; its
//! `IntoResponse` impl is the single terminal stage of the pipeline. The
//! error page is rendered through a process-wide view engine installed at
//! startup, with a plain-text fallback so unit tests and early-startup
//! failures still produce a response.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use domain::DomainError;
use infrastructure::{ViewContext, ViewEngine};
use thiserror::Error;
use tracing::error;

static VIEW_ENGINE: OnceLock<ViewEngine> = OnceLock::new();

/// Global flag to control error detail exposure.
/// Set to false in production so 5xx responses never carry internals.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Install the view engine used to render error pages
pub fn install_error_pages(engine: ViewEngine) {
    let _ = VIEW_ENGINE.set(engine);
}

/// Configure whether internal error details appear in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Default message when an error carries none
pub const GENERIC_MESSAGE: &str = "Internal Server Error";

/// An error destined for the rendered error page
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    /// Create an error with an explicit status and message.
    /// An empty message defaults to the generic string.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: if message.is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                message
            },
        }
    }

    /// 404 Not Found
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 400 Bad Request
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 403 Forbidden
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// 500 Internal Server Error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The response status
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The user-visible message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<infrastructure::templates::TemplateError> for PageError {
    fn from(err: infrastructure::templates::TemplateError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<ApplicationError> for PageError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::NotFound { .. }) => {
                Self::not_found(err.to_string())
            },
            ApplicationError::Domain(e) => Self::bad_request(e.to_string()),
            ApplicationError::NotFound(msg) => Self::not_found(msg),
            ApplicationError::NotAuthorized(msg) => Self::forbidden(msg),
            ApplicationError::Conflict(msg) => Self::bad_request(msg),
            ApplicationError::ExternalService(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status;
        let mut message = self.message;

        if status.is_server_error() {
            // The cause goes to the log; whether it also goes to the page
            // depends on the exposure flag.
            error!(%status, %message, "Request failed");
            if !should_expose_details() {
                message = GENERIC_MESSAGE.to_string();
            }
        }

        let Some(engine) = VIEW_ENGINE.get() else {
            return (status, message).into_response();
        };

        let mut ctx = ViewContext::new();
        ctx.insert("status", &status.as_u16());
        ctx.insert("message", &message);
        ctx.insert("current_user", &Option::<serde_json::Value>::None);
        ctx.insert("success", &Vec::<String>::new());
        ctx.insert("error", &Vec::<String>::new());

        match engine.render("error.html", &ctx) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!(error = %e, "Error page failed to render");
                (status, message).into_response()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_defaults_to_generic() {
        let err = PageError::new(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.message(), GENERIC_MESSAGE);
    }

    #[test]
    fn not_found_has_404_status() {
        let err = PageError::not_found("Page Not Found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Page Not Found");
    }

    #[test]
    fn application_not_authorized_maps_to_forbidden() {
        let err: PageError =
            ApplicationError::NotAuthorized("you do not own this campground".to_string()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn application_not_found_maps_to_404() {
        let err: PageError = ApplicationError::NotFound("Campground x".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn domain_not_found_maps_to_404() {
        let err: PageError =
            ApplicationError::Domain(DomainError::not_found("Review", "1")).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn domain_validation_maps_to_bad_request() {
        let err: PageError = ApplicationError::Domain(DomainError::InvalidRating(9)).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_500() {
        let err: PageError = ApplicationError::Internal("db gone".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn into_response_without_engine_is_plain_text() {
        let response = PageError::not_found("Page Not Found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_detail_is_hidden_when_exposure_disabled() {
        set_expose_internal_errors(false);
        let response = PageError::internal("connection refused to 10.0.0.5").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let body = String::from_utf8_lossy(&body);
        assert!(!body.contains("10.0.0.5"));
        set_expose_internal_errors(true);
    }
}
