//! Method-override middleware
//!
//! HTML forms can only submit GET and POST. A POST carrying
//! `_method=PUT|PATCH|DELETE` in its query string is rewritten to that
//! verb before routing, so the campground edit and delete forms can
//! express their real semantics over a form-only transport.
//!
//! Must sit outside the router: routing dispatches on the rewritten verb.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::Method,
    response::Response,
};
use tower::{Layer, Service};

/// Layer that applies method override
#[derive(Clone, Debug, Default)]
pub struct MethodOverrideLayer;

impl MethodOverrideLayer {
    /// Create a new method-override layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Middleware service that rewrites overridden methods
#[derive(Clone, Debug)]
pub struct MethodOverride<S> {
    inner: S,
}

/// Extract the `_method` override from a query string
fn override_from_query(query: &str) -> Option<Method> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "_method")
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

impl<S> Service<Request> for MethodOverride<S>
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
        if req.method() == Method::POST {
            if let Some(method) = req.uri().query().and_then(override_from_query) {
                *req.method_mut() = method;
            }
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::StatusCode,
        routing::{delete, get, put},
    };
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/items", get(|| async { "listed" }).post(|| async { "created" }))
            .route("/items/{id}", put(|| async { "updated" }))
            .route("/other/{id}", delete(|| async { "deleted" }))
            .layer(MethodOverrideLayer::new())
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[tokio::test]
    async fn post_with_override_becomes_put() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items/1?_method=PUT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "updated");
    }

    #[tokio::test]
    async fn post_with_override_becomes_delete() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/other/9?_method=delete")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "deleted");
    }

    #[tokio::test]
    async fn plain_post_is_untouched() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "created");
    }

    #[tokio::test]
    async fn get_cannot_be_overridden() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/items?_method=DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "listed");
    }

    #[tokio::test]
    async fn unknown_override_value_is_ignored() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/items?_method=TRACE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "created");
    }
}
