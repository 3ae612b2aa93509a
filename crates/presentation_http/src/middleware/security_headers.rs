//! Security headers middleware
//!
//! Adds security headers to every dynamic response. The
//! content-security-policy is assembled once, at construction, from the
//! configured origin allow-lists; request handling only copies header
//! values.
//!
//! The embedder policy is deliberately absent and the resource policy is
//! `cross-origin`: the map frontend spawns blob workers and loads tiles
//! and images from third-party origins, which COEP would block.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    response::Response,
};
use infrastructure::config::SecurityConfig;
use tower::{Layer, Service};
use tracing::warn;

/// Layer that adds security headers to all responses
#[derive(Clone, Debug)]
pub struct SecurityHeadersLayer {
    csp: HeaderValue,
}

fn directive(out: &mut String, name: &str, base: &[&str], origins: &[String]) {
    out.push_str(name);
    for source in base {
        out.push(' ');
        out.push_str(source);
    }
    for origin in origins {
        out.push(' ');
        out.push_str(origin);
    }
    out.push_str("; ");
}

/// Build the policy string from the configured allow-lists
fn build_csp(config: &SecurityConfig) -> String {
    let mut csp = String::new();
    directive(&mut csp, "default-src", &["'self'"], &[]);
    directive(&mut csp, "script-src", &["'self'"], &config.script_src);
    directive(&mut csp, "worker-src", &["'self'", "blob:"], &[]);
    directive(&mut csp, "connect-src", &["'self'"], &config.connect_src);
    directive(
        &mut csp,
        "style-src",
        &["'self'", "'unsafe-inline'"],
        &config.style_src,
    );
    directive(
        &mut csp,
        "img-src",
        &["'self'", "data:", "blob:"],
        &config.img_src,
    );
    directive(&mut csp, "font-src", &["'self'", "data:"], &config.font_src);
    csp.push_str("object-src 'none'");
    csp
}

impl SecurityHeadersLayer {
    /// Create a layer with the policy built from configuration
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let csp = HeaderValue::from_str(&build_csp(config)).unwrap_or_else(|_| {
            warn!("Configured CSP origins contain invalid characters, falling back to self-only");
            HeaderValue::from_static("default-src 'self'")
        });
        Self { csp }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeaders {
            inner,
            csp: self.csp.clone(),
        }
    }
}

/// Middleware service that adds security headers
#[derive(Clone, Debug)]
pub struct SecurityHeaders<S> {
    inner: S,
    csp: HeaderValue,
}

impl<S> Service<Request> for SecurityHeaders<S>
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

    fn call(&mut self, req: Request) -> Self::Future {
        let mut inner = self.inner.clone();
        let csp = self.csp.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let headers = response.headers_mut();

            headers.insert(HeaderName::from_static("content-security-policy"), csp);

            // Prevent MIME type sniffing
            headers.insert(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            );

            // Same-origin framing only
            headers.insert(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("SAMEORIGIN"),
            );

            headers.insert(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("no-referrer"),
            );

            // Third-party pages may embed our images; tiles flow the other way
            headers.insert(
                HeaderName::from_static("cross-origin-resource-policy"),
                HeaderValue::from_static("cross-origin"),
            );

            headers.insert(
                HeaderName::from_static("cross-origin-opener-policy"),
                HeaderValue::from_static("same-origin"),
            );

            Ok(response)
        })
    }
}
