//! Axum setup and router configuration
//!
//! Starts the HTTP server with the hero, power, and hero-power routes.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::routes::{self, health::ServerState};

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "5555")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path (default: $HERODEX_DB or ./herodex.db)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 5555,
            bind: "127.0.0.1".to_string(),
            db_path: None,
            timeout: 30,
        }
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    // Determine database path
    let db_path = args.db_path.unwrap_or_else(|| {
        std::env::var("HERODEX_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("herodex.db"))
    });

    info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    // Create shared state
    let state = Arc::new(RwLock::new(ServerState::new(db.clone())));

    // Build router
    let app = create_router(db, state, args.timeout);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    info!("Starting herodex on http://{}", addr);
    info!("Database: {}", db_path.display());

    // Create listener
    let listener = TcpListener::bind(addr).await?;

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(
    db: Database,
    state: Arc<RwLock<ServerState>>,
    timeout_secs: u64,
) -> Router {
    // CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Middleware stack
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    // Build routes
    Router::new()
        // Landing page and health
        .route("/", get(routes::index))
        .route("/health", get(routes::health_check))
        // Heroes
        .route("/heroes", get(routes::list_heroes))
        .route("/heroes/{id}", get(routes::get_hero))
        // Powers
        .route(
            "/powers/{id}",
            get(routes::get_power).patch(routes::update_power),
        )
        .route("/powers", get(routes::list_powers))
        // Hero-power links
        .route("/hero_powers", post(routes::create_hero_power))
        // State
        .with_state(db)
        // Health needs full state for uptime
        .layer(axum::Extension(state))
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let db = Database::open_in_memory().unwrap();
        let state = Arc::new(RwLock::new(ServerState::new(db.clone())));
        create_router(db, state, 30)
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_serves_html() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_database_lists_no_heroes() {
        let app = test_app();

        let response = app
            .oneshot(Request::builder().uri("/heroes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn default_args() {
        let args = ServerArgs::default();
        assert_eq!(args.port, 5555);
        assert_eq!(args.timeout, 30);
    }
}
