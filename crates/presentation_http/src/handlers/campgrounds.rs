//! Campground handlers

use application::{NewCampground, UpdateCampground};
use axum::Extension;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use domain::{Campground, CampgroundId, ImageRef};
use tower_sessions::Session;

use crate::context::{CurrentUser, PageContext};
use crate::error::PageError;
use crate::flash;
use crate::handlers::forms::{CampgroundForm, UpdateCampgroundForm};
use crate::handlers::require_login;
use crate::middleware::ValidatedForm;
use crate::state::AppState;

fn parse_id(id: &str) -> Result<CampgroundId, PageError> {
    CampgroundId::parse(id).map_err(|_| PageError::not_found("Campground not found"))
}

/// Derive an image reference from form fields; the storage identifier
/// falls back to the URL's last path segment.
fn image_from_form(url: Option<String>, filename: Option<String>) -> Option<ImageRef> {
    let url = url.filter(|u| !u.trim().is_empty())?;
    let filename = filename.filter(|f| !f.trim().is_empty()).unwrap_or_else(|| {
        url.rsplit('/')
            .next()
            .unwrap_or("external")
            .to_string()
    });
    Some(ImageRef::new(url, filename))
}

fn summary_json(campground: &Campground) -> serde_json::Value {
    serde_json::json!({
        "id": campground.id(),
        "title": campground.title(),
        "description": campground.description(),
        "location": campground.location(),
        "images": campground.images(),
    })
}

fn detail_json(campground: &Campground, author_name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": campground.id(),
        "title": campground.title(),
        "description": campground.description(),
        "location": campground.location(),
        "price": format!("{}", campground.price()),
        "author": campground.author(),
        "author_name": author_name,
        "geometry": campground.geometry().coordinates(),
        "images": campground.images(),
    })
}

/// `GET /campgrounds`
pub async fn index(State(state): State<AppState>, ctx: PageContext) -> Result<Response, PageError> {
    let campgrounds = state.campgrounds.list().await?;
    let summaries: Vec<_> = campgrounds.iter().map(summary_json).collect();

    let mut view = ctx.view();
    view.insert("campgrounds", &summaries);
    let html = state.views.render("campgrounds/index.html", &view)?;
    Ok(Html(html).into_response())
}

/// `GET /campgrounds/new`
pub async fn new_form(
    State(state): State<AppState>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let user = match require_login(&session, user.map(|e| e.0), "/campgrounds/new").await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let ctx = PageContext {
        current_user: Some(user),
        flash: flash::take(&session).await?,
    };
    let html = state.views.render("campgrounds/new.html", &ctx.view())?;
    Ok(Html(html).into_response())
}

/// `POST /campgrounds`
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
    ValidatedForm(form): ValidatedForm<CampgroundForm>,
) -> Result<Response, PageError> {
    let user = match require_login(&session, user.map(|e| e.0), "/campgrounds/new").await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let input = NewCampground {
        title: form.title,
        description: form.description,
        price: form.price,
        location: form.location,
        images: image_from_form(form.image_url, form.image_filename)
            .into_iter()
            .collect(),
    };
    let campground = state.campgrounds.create(user.id, input).await?;

    flash::success(&session, "Successfully made a new campground!").await?;
    Ok(Redirect::to(&format!("/campgrounds/{}", campground.id())).into_response())
}

/// `GET /campgrounds/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: PageContext,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let campground = state.campgrounds.get(id).await?;

    let author_name = state
        .accounts
        .get(campground.author())
        .await?
        .map_or_else(|| "unknown".to_string(), |u| u.username().to_string());

    let reviews = state.reviews.list_for_campground(id).await?;
    let review_views: Vec<_> = reviews
        .iter()
        .map(|entry| {
            serde_json::json!({
                "id": entry.review.id(),
                "rating": entry.review.rating().value(),
                "body": entry.review.body(),
                "author": entry.review.author(),
                "author_name": entry.author_name,
            })
        })
        .collect();

    let mut view = ctx.view();
    view.insert("campground", &detail_json(&campground, &author_name));
    view.insert("reviews", &review_views);
    let html = state.views.render("campgrounds/show.html", &view)?;
    Ok(Html(html).into_response())
}

/// `GET /campgrounds/{id}/edit`
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let return_to = format!("/campgrounds/{id}/edit");
    let user = match require_login(&session, user.map(|e| e.0), &return_to).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let id = parse_id(&id)?;
    let campground = state.campgrounds.get(id).await?;
    if !campground.is_owned_by(user.id) {
        return Err(PageError::forbidden(
            "You do not have permission to do that!",
        ));
    }

    let ctx = PageContext {
        current_user: Some(user),
        flash: flash::take(&session).await?,
    };
    let mut view = ctx.view();
    view.insert("campground", &detail_json(&campground, ""));
    let html = state.views.render("campgrounds/edit.html", &view)?;
    Ok(Html(html).into_response())
}

/// `PUT /campgrounds/{id}` (method-overridden POST)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
    ValidatedForm(form): ValidatedForm<UpdateCampgroundForm>,
) -> Result<Response, PageError> {
    let return_to = format!("/campgrounds/{id}/edit");
    let user = match require_login(&session, user.map(|e| e.0), &return_to).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let id = parse_id(&id)?;

    let input = UpdateCampground {
        title: form.title,
        description: form.description,
        price: form.price,
        location: form.location,
        add_images: image_from_form(form.image_url, form.image_filename)
            .into_iter()
            .collect(),
        delete_images: form.delete_images,
    };
    let campground = state.campgrounds.update(user.id, id, input).await?;

    flash::success(&session, "Successfully updated campground!").await?;
    Ok(Redirect::to(&format!("/campgrounds/{}", campground.id())).into_response())
}

/// `DELETE /campgrounds/{id}` (method-overridden POST)
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    user: Option<Extension<CurrentUser>>,
) -> Result<Response, PageError> {
    let user = match require_login(&session, user.map(|e| e.0), "/campgrounds").await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let id = parse_id(&id)?;

    state.campgrounds.delete(user.id, id).await?;

    flash::success(&session, "Successfully deleted campground").await?;
    Ok(Redirect::to("/campgrounds").into_response())
}
