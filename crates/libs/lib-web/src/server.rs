//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads [`Config`], builds the identity backend it names,
//! wraps it in an [`AuthGateway`], and serves [`create_router`].

// region: --- Imports
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use lib_core::{create_pool, Config, IdentityBackend, MemoryIdentity, SqliteIdentity};
use lib_utils::get_env_or;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use crate::services::AuthGateway;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<AuthGateway>,
}

impl AppState {
    pub fn new(gateway: AuthGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}

impl FromRef<AppState> for Arc<AuthGateway> {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by `BIND_ADDRESS` and `CORS_ORIGINS`
    /// (comma separated) when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = match std::env::var("CORS_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => defaults.allowed_origins,
        };

        Self {
            bind_address,
            allowed_origins,
            ..defaults
        }
    }
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - The tracing subscriber cannot be installed
/// - Configuration loading or validation fails
/// - Database connection or migrations fail (SQLite backend)
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" AUTH GATEWAY STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    let gateway = build_gateway(&app_config, config.migrations_path).await?;
    let state = AppState::new(gateway);

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Install the global subscriber; the level comes from `LOG_LEVEL`.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Build the gateway over the configured identity backend.
pub async fn build_gateway(config: &Config, migrations_path: &str) -> anyhow::Result<AuthGateway> {
    let policy = config.password_policy();
    let token_config = config.token_config();

    match config.identity_backend {
        IdentityBackend::Memory => {
            info!("Identity backend: in-memory (accounts are lost on restart)");
            Ok(AuthGateway::with_backend(
                Arc::new(MemoryIdentity::new(policy)),
                token_config,
            ))
        }
        IdentityBackend::Sqlite => {
            info!("Identity backend: SQLite at {}", config.database_url);
            ensure_sqlite_dir(&config.database_url)?;

            info!("Connecting to database...");
            let pool = create_pool(&config.database_url).await?;

            info!(" Running database migrations from: {}", migrations_path);
            let migrator = sqlx::migrate::Migrator::new(Path::new(migrations_path)).await?;
            migrator.run(&pool).await?;
            info!(" Migrations complete");

            Ok(AuthGateway::with_backend(
                Arc::new(SqliteIdentity::new(pool, policy)),
                token_config,
            ))
        }
    }
}

/// Create the parent directory of a file-backed SQLite URL.
fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    Ok(())
}

fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    // Outermost first: stamp, cors, trace, logging.
    Router::new()
        .route("/api/Auth/Login", post(handlers::auth::login))
        .route("/api/Auth/Register", post(handlers::auth::register))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(axum::middleware::from_fn(log_requests))
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
        .layer(cors)
        .layer(axum::middleware::from_fn(stamp_req))
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/Auth/Login");
    info!("   • POST /api/Auth/Register");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
