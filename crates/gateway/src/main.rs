//! Lectern API Gateway
//!
//! The entry point for all external API requests.
//! Handles:
//! - Request routing
//! - Entity CRUD and profile upsert
//! - File upload/download through the chunked blob store
//! - Observability (logging, metrics, tracing)

mod handlers;
mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use lectern_common::{config::AppConfig, db::Db, metrics};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Arc<Db>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));
    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.observability.json_logging {
        fmt.json().init();
    } else {
        fmt.init();
    }

    info!("Starting Lectern API Gateway v{}", lectern_common::VERSION);

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], config.observability.metrics_port))
            .set_buckets_for_metric(
                Matcher::Full(format!(
                    "{}_request_duration_seconds",
                    metrics::METRICS_PREFIX
                )),
                metrics::LATENCY_BUCKETS,
            )?
            .install()?;
    }
    metrics::register_metrics();

    // The shared database handle connects lazily on first use; concurrent
    // first requests await a single connection attempt.
    let db = Arc::new(Db::new(config.database.clone()));

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let max_upload = state.config.storage.max_upload_bytes;

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Profile (singleton, upsert on write)
        .route("/profile", get(handlers::profile::get_profile))
        .route("/profile", put(handlers::profile::update_profile))
        // Publications
        .route(
            "/publications",
            get(handlers::publications::list_publications)
                .post(handlers::publications::create_publication),
        )
        .route(
            "/publications/{id}",
            get(handlers::publications::get_publication)
                .put(handlers::publications::update_publication)
                .delete(handlers::publications::delete_publication),
        )
        // Projects
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project)
                .put(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        // Courses
        .route(
            "/courses",
            get(handlers::courses::list_courses).post(handlers::courses::create_course),
        )
        .route(
            "/courses/{id}",
            get(handlers::courses::get_course)
                .put(handlers::courses::update_course)
                .delete(handlers::courses::delete_course),
        )
        // Awards
        .route(
            "/awards",
            get(handlers::awards::list_awards).post(handlers::awards::create_award),
        )
        .route(
            "/awards/{id}",
            get(handlers::awards::get_award)
                .put(handlers::awards::update_award)
                .delete(handlers::awards::delete_award),
        )
        // Students
        .route(
            "/students",
            get(handlers::students::list_students).post(handlers::students::create_student),
        )
        .route(
            "/students/{id}",
            get(handlers::students::get_student)
                .put(handlers::students::update_student)
                .delete(handlers::students::delete_student),
        )
        // Files (chunked blob store)
        .route(
            "/files",
            post(handlers::files::upload_file).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route(
            "/files/{id}",
            get(handlers::files::download_file).delete(handlers::files::delete_file),
        );

    // Compose the app
    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::metrics::track_requests))
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
