//! View engine
//!
//! Tera with the page templates embedded at compile time. Every page
//! except the standalone landing page extends the boilerplate layout,
//! which renders the navbar and the one-shot flash messages.
//!
//! Rendering context contract (set by the HTTP layer):
//! - `current_user`: `{ id, username }` or null
//! - `success`, `error`: arrays of flash strings
//! - page-specific values documented per template

use std::sync::Arc;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    inner: Context,
}

impl ViewContext {
    /// Create a new empty context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const BOILERPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Basecamp</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
    <link rel="stylesheet" href="/assets/stylesheets/app.css">
</head>
<body class="d-flex flex-column vh-100">
    <nav class="navbar navbar-expand-lg navbar-dark bg-dark">
        <div class="container-fluid">
            <a class="navbar-brand" href="/">Basecamp</a>
            <div class="navbar-nav me-auto">
                <a class="nav-link" href="/">Home</a>
                <a class="nav-link" href="/campgrounds">Campgrounds</a>
                {% if current_user %}<a class="nav-link" href="/campgrounds/new">New Campground</a>{% endif %}
            </div>
            <div class="navbar-nav ms-auto">
                {% if current_user %}
                <span class="navbar-text me-2">Signed in as {{ current_user.username }}</span>
                <form class="d-inline" action="/logout" method="POST">
                    <button class="btn btn-link nav-link" type="submit">Logout</button>
                </form>
                {% else %}
                <a class="nav-link" href="/login">Login</a>
                <a class="nav-link" href="/register">Register</a>
                {% endif %}
            </div>
        </div>
    </nav>
    <main class="container mt-4 flex-grow-1">
        {% for message in success %}
        <div class="alert alert-success" role="alert">{{ message }}</div>
        {% endfor %}
        {% for message in error %}
        <div class="alert alert-danger" role="alert">{{ message }}</div>
        {% endfor %}
        {% block content %}{% endblock content %}
    </main>
    <footer class="footer bg-dark py-3 mt-4">
        <div class="container text-light">&copy; Basecamp</div>
    </footer>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"#;

    pub const HOME: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Basecamp</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
    <link rel="stylesheet" href="/assets/stylesheets/home.css">
</head>
<body class="d-flex text-center text-white bg-dark vh-100">
    <div class="cover-container d-flex w-100 h-100 p-3 mx-auto flex-column">
        <header>
            <nav class="nav nav-masthead justify-content-center">
                <a class="nav-link active" href="/">Home</a>
                <a class="nav-link" href="/campgrounds">Campgrounds</a>
                {% if current_user %}
                <form class="d-inline" action="/logout" method="POST">
                    <button class="btn btn-link nav-link" type="submit">Logout</button>
                </form>
                {% else %}
                <a class="nav-link" href="/login">Login</a>
                <a class="nav-link" href="/register">Register</a>
                {% endif %}
            </nav>
        </header>
        <main class="px-3 my-auto">
            <h1>Basecamp</h1>
            <p class="lead">Jump right in and explore our many campgrounds.</p>
            <a href="/campgrounds" class="btn btn-lg btn-secondary fw-bold border-white bg-white text-dark">View Campgrounds</a>
        </main>
        <footer class="mt-auto text-white-50"><p>&copy; Basecamp</p></footer>
    </div>
</body>
</html>
"#;

    pub const CAMPGROUNDS_INDEX: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<h1>All Campgrounds</h1>
{% for campground in campgrounds %}
<div class="card mb-3">
    <div class="row">
        <div class="col-md-4">
            {% if campground.images | length > 0 %}
            <img class="img-fluid" alt="" src="{{ campground.images.0.url }}">
            {% else %}
            <img class="img-fluid" alt="" src="https://res.cloudinary.com/douqbebwk/image/upload/v1600103881/Basecamp/lz8jjv2gyynjil7lswf4.png">
            {% endif %}
        </div>
        <div class="col-md-8">
            <div class="card-body">
                <h5 class="card-title">{{ campground.title }}</h5>
                <p class="card-text">{{ campground.description | truncate(length=160) }}</p>
                <p class="card-text"><small class="text-muted">{{ campground.location }}</small></p>
                <a class="btn btn-primary" href="/campgrounds/{{ campground.id }}">View {{ campground.title }}</a>
            </div>
        </div>
    </div>
</div>
{% else %}
<p>No campgrounds yet.</p>
{% endfor %}
{% endblock content %}
"#;

    pub const CAMPGROUNDS_SHOW: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="row">
    <div class="col-6">
        <div class="card mb-3">
            {% for image in campground.images %}
            <img class="card-img-top" alt="" src="{{ image.url }}">
            {% endfor %}
            <div class="card-body">
                <h5 class="card-title">{{ campground.title }}</h5>
                <p class="card-text">{{ campground.description }}</p>
            </div>
            <ul class="list-group list-group-flush">
                <li class="list-group-item text-muted">{{ campground.location }}</li>
                <li class="list-group-item">Submitted by {{ campground.author_name }}</li>
                <li class="list-group-item">${{ campground.price }}/night</li>
            </ul>
            {% if current_user and current_user.id == campground.author %}
            <div class="card-body">
                <a class="card-link btn btn-info" href="/campgrounds/{{ campground.id }}/edit">Edit</a>
                <form class="d-inline" action="/campgrounds/{{ campground.id }}?_method=DELETE" method="POST">
                    <button class="btn btn-danger">Delete</button>
                </form>
            </div>
            {% endif %}
        </div>
    </div>
    <div class="col-6">
        <div id="map" class="mb-3"
             data-longitude="{{ campground.geometry.0 }}"
             data-latitude="{{ campground.geometry.1 }}"></div>
        {% if current_user %}
        <h2>Leave a Review</h2>
        <form class="mb-3" action="/campgrounds/{{ campground.id }}/reviews" method="POST">
            <div class="mb-3">
                <label class="form-label" for="rating">Rating</label>
                <input class="form-range" type="range" min="1" max="5" name="rating" id="rating">
            </div>
            <div class="mb-3">
                <label class="form-label" for="body">Review Text</label>
                <textarea class="form-control" name="body" id="body" cols="30" rows="3" required></textarea>
            </div>
            <button class="btn btn-success">Submit</button>
        </form>
        {% endif %}
        {% for review in reviews %}
        <div class="card mb-3">
            <div class="card-body">
                <h5 class="card-title">{{ review.author_name }}</h5>
                <p class="starability-result" data-rating="{{ review.rating }}">Rated: {{ review.rating }} stars</p>
                <p class="card-text">Review: {{ review.body }}</p>
                {% if current_user and (current_user.id == review.author or current_user.id == campground.author) %}
                <form action="/campgrounds/{{ campground.id }}/reviews/{{ review.id }}?_method=DELETE" method="POST">
                    <button class="btn btn-sm btn-danger">Delete</button>
                </form>
                {% endif %}
            </div>
        </div>
        {% endfor %}
    </div>
</div>
{% endblock content %}
"#;

    pub const CAMPGROUNDS_NEW: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="row">
    <h1 class="text-center">New Campground</h1>
    <div class="col-6 offset-3">
        <form action="/campgrounds" method="POST" novalidate>
            <div class="mb-3">
                <label class="form-label" for="title">Title</label>
                <input class="form-control" type="text" id="title" name="title" required>
            </div>
            <div class="mb-3">
                <label class="form-label" for="location">Location</label>
                <input class="form-control" type="text" id="location" name="location" required>
            </div>
            <div class="mb-3">
                <label class="form-label" for="price">Campground Price</label>
                <div class="input-group">
                    <span class="input-group-text">$</span>
                    <input class="form-control" type="number" step="0.01" min="0" id="price" name="price" placeholder="0.00" required>
                </div>
            </div>
            <div class="mb-3">
                <label class="form-label" for="description">Description</label>
                <textarea class="form-control" id="description" name="description"></textarea>
            </div>
            <div class="mb-3">
                <label class="form-label" for="image_url">Image URL</label>
                <input class="form-control" type="url" id="image_url" name="image_url">
            </div>
            <div class="mb-3">
                <button class="btn btn-success">Add Campground</button>
            </div>
        </form>
        <a href="/campgrounds">All Campgrounds</a>
    </div>
</div>
{% endblock content %}
"#;

    pub const CAMPGROUNDS_EDIT: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="row">
    <h1 class="text-center">Edit Campground</h1>
    <div class="col-6 offset-3">
        <form action="/campgrounds/{{ campground.id }}?_method=PUT" method="POST" novalidate>
            <div class="mb-3">
                <label class="form-label" for="title">Title</label>
                <input class="form-control" type="text" id="title" name="title" value="{{ campground.title }}" required>
            </div>
            <div class="mb-3">
                <label class="form-label" for="location">Location</label>
                <input class="form-control" type="text" id="location" name="location" value="{{ campground.location }}" required>
            </div>
            <div class="mb-3">
                <label class="form-label" for="price">Campground Price</label>
                <div class="input-group">
                    <span class="input-group-text">$</span>
                    <input class="form-control" type="number" step="0.01" min="0" id="price" name="price" value="{{ campground.price }}" required>
                </div>
            </div>
            <div class="mb-3">
                <label class="form-label" for="description">Description</label>
                <textarea class="form-control" id="description" name="description">{{ campground.description }}</textarea>
            </div>
            <div class="mb-3">
                <label class="form-label" for="image_url">Add Image URL</label>
                <input class="form-control" type="url" id="image_url" name="image_url">
            </div>
            {% if campground.images | length > 0 %}
            <div class="mb-3">
                {% for image in campground.images %}
                <div class="form-check form-check-inline">
                    <input class="form-check-input" type="checkbox" id="image-{{ loop.index }}" name="delete_images" value="{{ image.filename }}">
                    <label class="form-check-label" for="image-{{ loop.index }}">Delete {{ image.filename }}</label>
                </div>
                {% endfor %}
            </div>
            {% endif %}
            <div class="mb-3">
                <button class="btn btn-info">Update Campground</button>
            </div>
        </form>
        <a href="/campgrounds/{{ campground.id }}">Back to Campground</a>
    </div>
</div>
{% endblock content %}
"#;

    pub const USERS_REGISTER: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="container d-flex justify-content-center align-items-center mt-5">
    <div class="row">
        <div class="col-md-12 col-xl-12">
            <div class="card shadow">
                <div class="card-body">
                    <h5 class="card-title">Register</h5>
                    <form action="/register" method="POST" novalidate>
                        <div class="mb-3">
                            <label class="form-label" for="username">Username</label>
                            <input class="form-control" type="text" id="username" name="username" autofocus required>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="email">Email</label>
                            <input class="form-control" type="email" id="email" name="email" required>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="password">Password</label>
                            <input class="form-control" type="password" id="password" name="password" required>
                        </div>
                        <button class="btn btn-success btn-block">Register</button>
                    </form>
                </div>
            </div>
        </div>
    </div>
</div>
{% endblock content %}
"#;

    pub const USERS_LOGIN: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="container d-flex justify-content-center align-items-center mt-5">
    <div class="row">
        <div class="col-md-12 col-xl-12">
            <div class="card shadow">
                <div class="card-body">
                    <h5 class="card-title">Login</h5>
                    <form action="/login" method="POST" novalidate>
                        <div class="mb-3">
                            <label class="form-label" for="username">Username</label>
                            <input class="form-control" type="text" id="username" name="username" autofocus required>
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="password">Password</label>
                            <input class="form-control" type="password" id="password" name="password" required>
                        </div>
                        <button class="btn btn-success btn-block">Login</button>
                    </form>
                </div>
            </div>
        </div>
    </div>
</div>
{% endblock content %}
"#;

    pub const ERROR: &str = r#"{% extends "layouts/boilerplate.html" %}
{% block content %}
<div class="row">
    <div class="col-6 offset-3">
        <div class="alert alert-danger" role="alert">
            <h4 class="alert-heading">{{ status }} &mdash; {{ message }}</h4>
            <p>Sorry, something went wrong. Head back to the <a href="/campgrounds" class="alert-link">campgrounds</a>.</p>
        </div>
    </div>
</div>
{% endblock content %}
"#;
}

/// Tera-backed view engine with embedded page templates
#[derive(Clone)]
pub struct ViewEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for ViewEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEngine").finish_non_exhaustive()
    }
}

impl ViewEngine {
    /// Create a view engine with the embedded templates loaded
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm"]);

        tera.add_raw_templates(vec![
            ("layouts/boilerplate.html", embedded::BOILERPLATE),
            ("home.html", embedded::HOME),
            ("campgrounds/index.html", embedded::CAMPGROUNDS_INDEX),
            ("campgrounds/show.html", embedded::CAMPGROUNDS_SHOW),
            ("campgrounds/new.html", embedded::CAMPGROUNDS_NEW),
            ("campgrounds/edit.html", embedded::CAMPGROUNDS_EDIT),
            ("users/register.html", embedded::USERS_REGISTER),
            ("users/login.html", embedded::USERS_LOGIN),
            ("error.html", embedded::ERROR),
        ])
        .map_err(|e| TemplateError::Compile(e.to_string()))?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &ViewContext) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Check if a template exists
    #[must_use]
    pub fn template_exists(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context() -> ViewContext {
        let mut ctx = ViewContext::new();
        ctx.insert("current_user", &Option::<serde_json::Value>::None);
        ctx.insert("success", &Vec::<String>::new());
        ctx.insert("error", &Vec::<String>::new());
        ctx
    }

    #[test]
    fn engine_compiles_all_templates() {
        let engine = ViewEngine::new().unwrap();
        for name in [
            "layouts/boilerplate.html",
            "home.html",
            "campgrounds/index.html",
            "campgrounds/show.html",
            "campgrounds/new.html",
            "campgrounds/edit.html",
            "users/register.html",
            "users/login.html",
            "error.html",
        ] {
            assert!(engine.template_exists(name), "missing template {name}");
        }
    }

    #[test]
    fn error_template_shows_status_and_message() {
        let engine = ViewEngine::new().unwrap();
        let mut ctx = base_context();
        ctx.insert("status", &404);
        ctx.insert("message", "Page Not Found");

        let html = engine.render("error.html", &ctx).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Page Not Found"));
    }

    #[test]
    fn index_lists_campgrounds() {
        let engine = ViewEngine::new().unwrap();
        let mut ctx = base_context();
        ctx.insert(
            "campgrounds",
            &serde_json::json!([{
                "id": "abc",
                "title": "Misty Hollow",
                "description": "A quiet site.",
                "location": "Bend, Oregon",
                "images": [],
            }]),
        );

        let html = engine.render("campgrounds/index.html", &ctx).unwrap();
        assert!(html.contains("Misty Hollow"));
        assert!(html.contains("/campgrounds/abc"));
    }

    #[test]
    fn flash_messages_render_in_layout() {
        let engine = ViewEngine::new().unwrap();
        let mut ctx = ViewContext::new();
        ctx.insert("current_user", &Option::<serde_json::Value>::None);
        ctx.insert("success", &["Welcome back!"]);
        ctx.insert("error", &Vec::<String>::new());
        ctx.insert("campgrounds", &Vec::<serde_json::Value>::new());

        let html = engine.render("campgrounds/index.html", &ctx).unwrap();
        assert!(html.contains("Welcome back!"));
        assert!(html.contains("alert-success"));
    }

    #[test]
    fn show_hides_owner_controls_from_strangers() {
        let engine = ViewEngine::new().unwrap();
        let mut ctx = base_context();
        ctx.insert(
            "campground",
            &serde_json::json!({
                "id": "abc",
                "title": "Misty Hollow",
                "description": "A quiet site.",
                "location": "Bend, Oregon",
                "price": "18.00",
                "author": "owner-id",
                "author_name": "ranger",
                "geometry": [-121.3, 44.05],
                "images": [],
            }),
        );
        ctx.insert("reviews", &Vec::<serde_json::Value>::new());

        let html = engine.render("campgrounds/show.html", &ctx).unwrap();
        assert!(!html.contains("?_method=DELETE"));

        ctx.insert(
            "current_user",
            &serde_json::json!({ "id": "owner-id", "username": "ranger" }),
        );
        let html = engine.render("campgrounds/show.html", &ctx).unwrap();
        assert!(html.contains("?_method=DELETE"));
    }

    #[test]
    fn html_in_user_content_is_escaped() {
        let engine = ViewEngine::new().unwrap();
        let mut ctx = base_context();
        ctx.insert(
            "campgrounds",
            &serde_json::json!([{
                "id": "abc",
                "title": "<script>alert(1)</script>",
                "description": "x",
                "location": "y",
                "images": [],
            }]),
        );

        let html = engine.render("campgrounds/index.html", &ctx).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
