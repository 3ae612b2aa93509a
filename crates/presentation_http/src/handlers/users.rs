//! Account handlers
//!
//! Login rotates the session id before storing the identity, so a
//! pre-login cookie can never become an authenticated session.

use application::ApplicationError;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::context::{PageContext, USER_ID_KEY};
use crate::error::PageError;
use crate::flash;
use crate::handlers::RETURN_TO_KEY;
use crate::handlers::forms::{LoginForm, RegisterForm, validated};
use crate::state::AppState;

fn session_error(e: tower_sessions::session::Error) -> PageError {
    PageError::internal(format!("session store: {e}"))
}

/// `GET /register`
pub async fn register_form(
    State(state): State<AppState>,
    ctx: PageContext,
) -> Result<Response, PageError> {
    let html = state.views.render("users/register.html", &ctx.view())?;
    Ok(Html(html).into_response())
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, PageError> {
    let form = match validated(form) {
        Ok(form) => form,
        Err(e) => {
            flash::error(&session, e.message()).await?;
            return Ok(Redirect::to("/register").into_response());
        },
    };

    let user = match state
        .accounts
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => user,
        // Conflicts and validation problems are user-fixable: send them
        // back to the form instead of the error page.
        Err(e @ (ApplicationError::Conflict(_) | ApplicationError::Domain(_))) => {
            flash::error(&session, e.to_string()).await?;
            return Ok(Redirect::to("/register").into_response());
        },
        Err(e) => return Err(e.into()),
    };

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(USER_ID_KEY, user.id().to_string())
        .await
        .map_err(session_error)?;

    flash::success(&session, "Welcome to Basecamp!").await?;
    Ok(Redirect::to("/campgrounds").into_response())
}

/// `GET /login`
pub async fn login_form(
    State(state): State<AppState>,
    ctx: PageContext,
) -> Result<Response, PageError> {
    let html = state.views.render("users/login.html", &ctx.view())?;
    Ok(Html(html).into_response())
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, PageError> {
    let Some(user) = state
        .accounts
        .verify_credentials(&form.username, &form.password)
        .await?
    else {
        flash::error(&session, "Invalid username or password").await?;
        return Ok(Redirect::to("/login").into_response());
    };

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(USER_ID_KEY, user.id().to_string())
        .await
        .map_err(session_error)?;

    let destination: String = session
        .remove(RETURN_TO_KEY)
        .await
        .map_err(session_error)?
        .unwrap_or_else(|| "/campgrounds".to_string());

    flash::success(&session, "Welcome back!").await?;
    Ok(Redirect::to(&destination).into_response())
}

/// `POST /logout`
pub async fn logout(session: Session) -> Result<Response, PageError> {
    // Flush deletes the record and clears the cookie binding; the flash
    // below starts a fresh anonymous session.
    session.flush().await.map_err(session_error)?;
    flash::success(&session, "Goodbye!").await?;
    Ok(Redirect::to("/campgrounds").into_response())
}
