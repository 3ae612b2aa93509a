//! Input-sanitization middleware
//!
//! Rewrites user-supplied keys in the query string and in urlencoded form
//! bodies: every `$` or `.` in a key becomes `_`, so no key that could be
//! read as a document-query operator reaches a handler. Values are left
//! alone. Runs after parsing-adjacent stages and before routing, so every
//! handler sees sanitized input.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE, uri::PathAndQuery},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::debug;

use crate::error::PageError;

/// Layer that applies input sanitization
///
/// `max_bytes` bounds how much body this layer will buffer; larger
/// bodies are answered with 413 before any handler runs.
#[derive(Clone, Debug)]
pub struct SanitizeLayer {
    max_bytes: usize,
}

impl SanitizeLayer {
    /// Create a new sanitization layer with the given buffering bound
    #[must_use]
    pub const fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl<S> Layer<S> for SanitizeLayer {
    type Service = Sanitize<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Sanitize {
            inner,
            max_bytes: self.max_bytes,
        }
    }
}

/// Middleware service that rewrites reserved characters in input keys
#[derive(Clone, Debug)]
pub struct Sanitize<S> {
    inner: S,
    max_bytes: usize,
}

/// Replace reserved operator characters in a key
fn sanitize_key(key: &str) -> String {
    key.replace(['$', '.'], "_")
}

/// Rewrite the keys of an urlencoded string. Returns `None` when nothing
/// needed changing, so untouched requests pass through byte-identical.
fn sanitize_pairs(encoded: &str) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(encoded).ok()?;
    if pairs
        .iter()
        .all(|(key, _)| !key.contains('$') && !key.contains('.'))
    {
        return None;
    }

    let sanitized: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(key, value)| (sanitize_key(&key), value))
        .collect();
    serde_urlencoded::to_string(&sanitized).ok()
}

fn is_urlencoded_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S> Service<Request> for Sanitize<S>
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
        let mut inner = self.inner.clone();
        let max_bytes = self.max_bytes;

        Box::pin(async move {
            // Query-string keys.
            if let Some(sanitized) = req.uri().query().and_then(sanitize_pairs) {
                debug!("Sanitized query-string keys");
                let path = req.uri().path().to_string();
                let path_and_query = format!("{path}?{sanitized}");
                let mut parts = req.uri().clone().into_parts();
                match PathAndQuery::from_maybe_shared(path_and_query) {
                    Ok(pq) => {
                        parts.path_and_query = Some(pq);
                        if let Ok(uri) = axum::http::Uri::from_parts(parts) {
                            *req.uri_mut() = uri;
                        }
                    },
                    Err(_) => {
                        return Ok(
                            PageError::bad_request("malformed query string").into_response()
                        );
                    },
                }
            }

            // Form-body keys.
            let has_body = !matches!(*req.method(), Method::GET | Method::HEAD);
            if has_body && is_urlencoded_form(&req) {
                let (parts, body) = req.into_parts();
                let Ok(bytes) = axum::body::to_bytes(body, max_bytes).await else {
                    return Ok(PageError::new(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "request body too large",
                    )
                    .into_response());
                };

                let new_bytes = match std::str::from_utf8(&bytes)
                    .ok()
                    .and_then(sanitize_pairs)
                {
                    Some(sanitized) => {
                        debug!("Sanitized form-body keys");
                        Bytes::from(sanitized)
                    },
                    None => bytes,
                };

                let length = new_bytes.len();
                req = Request::from_parts(parts, Body::from(new_bytes));
                // Length may have changed with the rewritten keys.
                req.headers_mut()
                    .insert(axum::http::header::CONTENT_LENGTH, HeaderValue::from(length));
            }

            inner.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Form, Router,
        extract::RawQuery,
        http::StatusCode,
        routing::{get, post},
    };
    use tower::ServiceExt;

    use super::*;

    async fn echo_query(RawQuery(query): RawQuery) -> String {
        query.unwrap_or_default()
    }

    async fn echo_form_keys(Form(fields): Form<HashMap<String, String>>) -> String {
        let mut keys: Vec<_> = fields.keys().cloned().collect();
        keys.sort();
        keys.join(",")
    }

    fn app() -> Router {
        Router::new()
            .route("/query", get(echo_query))
            .route("/form", post(echo_form_keys))
            .layer(SanitizeLayer::new(1024))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[test]
    fn sanitize_key_replaces_reserved_characters() {
        assert_eq!(sanitize_key("$gt"), "_gt");
        assert_eq!(sanitize_key("user.name"), "user_name");
        assert_eq!(sanitize_key("plain"), "plain");
    }

    #[test]
    fn untouched_input_is_passed_through() {
        assert!(sanitize_pairs("title=Misty&price=10").is_none());
    }

    #[tokio::test]
    async fn query_operator_keys_are_neutralized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/query?%24gt=1&title=ok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed = body_text(response).await;
        assert!(echoed.contains("_gt=1"));
        assert!(!echoed.contains("%24gt"));
    }

    #[tokio::test]
    async fn form_body_keys_are_neutralized() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/form")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("%24where=1&user.name=x&title=ok"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "_where,title,user_name");
    }

    #[tokio::test]
    async fn clean_form_body_is_untouched() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/form")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("title=Misty+Hollow&price=18"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "price,title");
    }

    #[tokio::test]
    async fn oversized_form_body_is_rejected() {
        let huge = format!("title={}", "x".repeat(4096));
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/form")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(huge))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn non_form_bodies_are_ignored() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/form")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"$gt": 1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        // The form handler rejects JSON, but the body reached it unmodified.
        assert_ne!(response.status(), StatusCode::OK);
    }
}
