//! Landing page

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use crate::context::PageContext;
use crate::error::PageError;
use crate::state::AppState;

/// `GET /`
pub async fn home(State(state): State<AppState>, ctx: PageContext) -> Result<Response, PageError> {
    let html = state.views.render("home.html", &ctx.view())?;
    Ok(Html(html).into_response())
}
