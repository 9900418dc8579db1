pub mod cors;
mod debug_env;
pub mod debug_info;
pub mod environment;
pub mod key_status;
pub mod probe_error;

use std::sync::Arc;

use axum::http::Uri;
use axum::{routing::get, Extension, Router};
use serde::Deserialize;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use cors::CorsHeadersLayer;
use environment::{Environment, ProcessEnvironment};
use probe_error::ProbeError;

pub const DEBUG_ENV_ROUTE: &str = "/debug_env";
pub const DEBUG_INFO_ROUTE: &str = "/debug_info";
pub const API_PREFIX: &str = "/api";

/// Every path the router answers, in registration order.
pub const ROUTES: [&str; 4] = [
    "/debug_env",
    "/debug_info",
    "/api/debug_env",
    "/api/debug_info",
];

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub address: String,
    pub port: String,
    pub log_level: String,
    // Names of the variables consulted at request time
    pub key_variable: String,
    pub origin_variable: String,
    pub deployment_variable: String,
    pub exposed_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: "8080".to_string(),
            log_level: "info".to_string(),
            key_variable: "NEWS_API_KEY".to_string(),
            origin_variable: "ALLOWED_ORIGIN".to_string(),
            deployment_variable: "DEPLOYMENT_ENV".to_string(),
            exposed_prefixes: vec!["PUBLIC_".to_string()],
        }
    }
}

/// Read-only state shared by every request.
pub struct ProbeState {
    pub config: Config,
    pub environment: Arc<dyn Environment>,
}

impl ProbeState {
    pub fn new(config: Config, environment: Arc<dyn Environment>) -> Self {
        Self {
            config,
            environment,
        }
    }
}

pub fn build_router(state: Arc<ProbeState>) -> Router {
    let debug_routes = Router::new()
        .route(
            DEBUG_ENV_ROUTE,
            get(debug_env::handle).options(cors::preflight),
        )
        .route(
            DEBUG_INFO_ROUTE,
            get(debug_info::handle).options(cors::preflight),
        );

    Router::new()
        .merge(debug_routes.clone())
        .nest(API_PREFIX, debug_routes)
        .fallback(not_found)
        .layer(Extension(state.clone()))
        .layer(CorsHeadersLayer::new(state))
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: Uri) -> ProbeError {
    ProbeError::NotFound(uri.path().to_string())
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let address = config.address.clone();
    let port = config.port.clone();

    info!(
        "reporting on {} (origin from {})",
        config.key_variable, config.origin_variable
    );

    let state = Arc::new(ProbeState::new(config, Arc::new(ProcessEnvironment)));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", &address, &port)).await?;

    info!("running envprobe server on {}:{}", &address, &port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
