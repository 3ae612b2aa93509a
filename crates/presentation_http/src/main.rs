//! Basecamp HTTP server
//!
//! Main entry point: load configuration, open the store, wire the
//! services, compose the pipeline and serve until shutdown.

use std::{sync::Arc, time::Duration};

use application::ports::Geocoder;
use application::{AccountService, CampgroundService, ReviewService};
use infrastructure::persistence::{
    SqliteCampgroundStore, SqliteReviewStore, SqliteUserStore,
};
use infrastructure::{
    AppConfig, Argon2PasswordHasher, MapTilerGeocoder, SqliteSessionStore, ViewEngine, create_pool,
};
use presentation_http::{
    AppState, build_app, install_error_pages, set_expose_internal_errors,
};
use tokio::{net::TcpListener, signal};
use tower_sessions::ExpiredDeletion;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hourly sweep of expired session rows
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first; the log format depends on it.
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "basecamp_server=debug,presentation_http=debug,tower_http=info".into());
    if config.server.log_format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Basecamp v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
    set_expose_internal_errors(!config.environment.is_production());

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    // Store
    let pool = Arc::new(create_pool(&config.database)?);

    let campground_store = Arc::new(SqliteCampgroundStore::new(Arc::clone(&pool)));
    let review_store = Arc::new(SqliteReviewStore::new(Arc::clone(&pool)));
    let user_store = Arc::new(SqliteUserStore::new(Arc::clone(&pool)));

    // Services
    let mut campgrounds =
        CampgroundService::new(campground_store.clone(), review_store.clone());
    match MapTilerGeocoder::from_config(&config.geocoder) {
        Ok(Some(geocoder)) => {
            info!("Geocoding enabled");
            let geocoder: Arc<dyn Geocoder> = Arc::new(geocoder);
            campgrounds = campgrounds.with_geocoder(geocoder);
        },
        Ok(None) => info!("No geocoder API key; listings keep a default map point"),
        Err(e) => return Err(anyhow::anyhow!("geocoder setup failed: {e}")),
    }

    let reviews = ReviewService::new(
        review_store.clone(),
        campground_store.clone(),
        user_store.clone(),
    );
    let accounts = AccountService::new(user_store.clone(), Arc::new(Argon2PasswordHasher::new()));

    // Views and the terminal error page
    let views = ViewEngine::new().map_err(|e| anyhow::anyhow!("view engine: {e}"))?;
    install_error_pages(views.clone());

    // Sessions
    let session_store = SqliteSessionStore::new(Arc::clone(&pool))
        .with_touch_after(config.session.touch_after_secs);
    let deletion_task = tokio::task::spawn(
        session_store
            .clone()
            .continuously_delete_expired(SESSION_SWEEP_INTERVAL),
    );

    let config = Arc::new(config);
    let state = AppState {
        campgrounds: Arc::new(campgrounds),
        reviews: Arc::new(reviews),
        accounts: Arc::new(accounts),
        users: user_store,
        views,
        config: Arc::clone(&config),
    };

    let app = build_app(state, session_store);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    let shutdown_timeout =
        Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    deletion_task.abort();
    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {timeout:?} for connections to close...");
}
