//! Route definitions and pipeline composition
//!
//! The single place the request pipeline is assembled. Stage order is a
//! contract; later stages read state the earlier ones set up:
//!
//! 1. trace, then the body-size limit (bounds what parsing will buffer)
//! 2. method override (before routing, so dispatch sees the real verb)
//! 3. static assets are merged outside this stack and skip all of it
//! 4. session attachment (signed cookie, server-side store)
//! 5. flash arrays live in the session; no separate stage
//! 6. security headers on every dynamic response
//! 7. authentication context (reads the session)
//! 8. input sanitization (rewrites keys before any handler parses them)
//! 9. view-local context is the `PageContext` extractor, per handler
//! 10-11. router dispatch, then the not-found fallback
//! 12. every error funnels into `PageError`'s response

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use secrecy::ExposeSecret;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::Key};

use infrastructure::SqliteSessionStore;

use crate::error::PageError;
use crate::handlers::{campgrounds, pages, reviews, users};
use crate::middleware::{
    CurrentUserLayer, MethodOverrideLayer, SanitizeLayer, SecurityHeadersLayer,
};
use crate::state::AppState;

/// Derive the cookie-signing key from the configured secret
fn signing_key(secret: &secrecy::SecretString) -> Key {
    let digest = blake3::hash(secret.expose_secret().as_bytes());
    Key::derive_from(digest.as_bytes())
}

/// Any request unmatched by all resource routes
async fn not_found() -> PageError {
    PageError::not_found("Page Not Found")
}

/// Build the application router with the full pipeline applied
pub fn build_app(state: AppState, session_store: SqliteSessionStore) -> Router {
    let config = &state.config;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(config.session.cookie_name.clone())
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            config.session.expiry_days,
        )))
        .with_http_only(true)
        .with_secure(false)
        .with_signed(signing_key(&config.session.secret));

    let dynamic = Router::new()
        .route("/", get(pages::home))
        .route(
            "/campgrounds",
            get(campgrounds::index).post(campgrounds::create),
        )
        .route("/campgrounds/new", get(campgrounds::new_form))
        .route(
            "/campgrounds/{id}",
            get(campgrounds::show)
                .put(campgrounds::update)
                .delete(campgrounds::destroy),
        )
        .route("/campgrounds/{id}/edit", get(campgrounds::edit_form))
        .route("/campgrounds/{id}/reviews", post(reviews::create))
        .route(
            "/campgrounds/{id}/reviews/{review_id}",
            delete(reviews::destroy),
        )
        .route("/register", get(users::register_form).post(users::register))
        .route("/login", get(users::login_form).post(users::login))
        .route("/logout", post(users::logout))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
                .layer(MethodOverrideLayer::new())
                .layer(session_layer)
                .layer(SecurityHeadersLayer::new(&config.security))
                .layer(CurrentUserLayer::new(state.users.clone()))
                .layer(SanitizeLayer::new(config.server.max_body_bytes)),
        )
        .with_state(state.clone());

    // Assets bypass the session stack entirely.
    Router::new()
        .nest_service("/assets", ServeDir::new(&config.server.assets_dir))
        .merge(dynamic)
}
