//! Review handlers

use application::NewReview;
use axum::Extension;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use domain::{CampgroundId, ReviewId};
use tower_sessions::Session;

use crate::context::CurrentUser;
use crate::error::PageError;
use crate::flash;
use crate::handlers::forms::ReviewForm;
use crate::handlers::require_login;
use crate::middleware::ValidatedForm;
use crate::state::AppState;

fn parse_campground_id(id: &str) -> Result<CampgroundId, PageError> {
    CampgroundId::parse(id).map_err(|_| PageError::not_found("Campground not found"))
}

/// `POST /campgrounds/{id}/reviews`
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
    ValidatedForm(form): ValidatedForm<ReviewForm>,
) -> Result<Response, PageError> {
    let return_to = format!("/campgrounds/{id}");
    let user = match require_login(&session, user.map(|e| e.0), &return_to).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let campground = parse_campground_id(&id)?;

    state
        .reviews
        .create(
            user.id,
            campground,
            NewReview {
                rating: form.rating,
                body: form.body,
            },
        )
        .await?;

    flash::success(&session, "Created new review!").await?;
    Ok(Redirect::to(&format!("/campgrounds/{campground}")).into_response())
}

/// `DELETE /campgrounds/{id}/reviews/{review_id}` (method-overridden POST)
pub async fn destroy(
    State(state): State<AppState>,
    Path((id, review_id)): Path<(String, String)>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let return_to = format!("/campgrounds/{id}");
    let user = match require_login(&session, user.map(|e| e.0), &return_to).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let campground = parse_campground_id(&id)?;
    let review =
        ReviewId::parse(&review_id).map_err(|_| PageError::not_found("Review not found"))?;

    state.reviews.delete(user.id, campground, review).await?;

    flash::success(&session, "Successfully deleted review").await?;
    Ok(Redirect::to(&format!("/campgrounds/{campground}")).into_response())
}
