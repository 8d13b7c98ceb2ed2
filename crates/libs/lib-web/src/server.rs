//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`create_router`] builds the full application from an [`AppState`] and is
//! what the handler tests drive. [`start_server`] connects the store, applies
//! migrations, and serves that router.

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use lib_auth::TokenCodec;
use lib_core::{create_pool, run_migrations, AppError, Config, DbPool};
use lib_utils::get_env_or;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use crate::services::AuthService;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub tokens: Arc<TokenCodec>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Wire the token codec and auth service for `db` from `config`.
    pub fn new(db: DbPool, config: &Config) -> Self {
        let tokens = Arc::new(TokenCodec::new(&config.jwt_secret, config.jwt_expiration_hours));
        let auth = Arc::new(AuthService::new(db.clone(), tokens.clone()));
        Self { db, tokens, auth }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read `BIND_ADDRESS` and `ALLOWED_ORIGINS` (comma separated).
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.allowed_origins);

        Self {
            bind_address,
            allowed_origins,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Tracing
/// Install the global tracing subscriber, filtered by `LOG_LEVEL`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .is_ok();

    if installed {
        info!(" Log level: {}", log_level);
    }
}
// endregion: --- Tracing

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: Config, server: ServerConfig) -> anyhow::Result<()> {
    info!(" RECORD SHOP BACKEND STARTING");
    info!("Database URL: {}", config.database_url);

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    info!(" Running database migrations...");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    let state = AppState::new(pool, &config);
    let app = create_router(state, &server.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&server.bind_address).await?;

    info!(" SERVER READY: http://{}", server.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    info!("[ROUTE SETUP] Registering HTTP routes...");

    let api = Router::new()
        .route("/test", get(handlers::protected::test))
        .route("/me", get(handlers::protected::me))
        .route("/records", post(handlers::records::create_record))
        .route(
            "/records/{id}",
            axum::routing::put(handlers::records::update_record)
                .delete(handlers::records::delete_record),
        )
        .route("/categories", post(handlers::categories::create_category))
        .route(
            "/categories/{id}",
            axum::routing::put(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .fallback(route_not_found)
        // Wraps the fallback too, so every /api path without a valid token is 401
        .layer(middleware::from_fn_with_state(state.tokens.clone(), require_auth));

    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/signin", post(handlers::auth::signin))
        .route("/records", get(handlers::records::list_records))
        .route("/records/{id}", get(handlers::records::get_record))
        .route("/categories", get(handlers::categories::list_categories))
        .route("/categories/{id}", get(handlers::categories::get_category))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state)
        // Request/response logging; sees the stamp because it runs inside stamp_req
        .layer(middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(stamp_req))
        .layer(cors_layer(allowed_origins))
}

async fn route_not_found() -> AppError {
    info!("[404 HANDLER] Unmatched route - returning 404");
    AppError::NotFound("Route not found".to_string())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    cors.allow_origin(origins)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /auth/signup");
    info!("   • POST /auth/signin");
    info!(" CATALOG:");
    info!("   • GET  /records, /records/{{id}}");
    info!("   • GET  /categories, /categories/{{id}}");
    info!(" GATED (Authorization: Bearer <token>):");
    info!("   • GET  /api/test, /api/me");
    info!("   • POST /api/records, PUT|DELETE /api/records/{{id}}");
    info!("   • POST /api/categories, PUT|DELETE /api/categories/{{id}}");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
