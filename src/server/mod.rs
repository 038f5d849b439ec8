//! HTTP server: shared context, router construction, and lifecycle.

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use sp_av::{ProcessRunner, ToolRegistry, ToolRunner};
use sp_core::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
mod request_id;
pub mod routes_admin;
pub mod routes_convert;
pub mod routes_meta;
pub mod routes_packager;
pub mod upload;

/// Application context shared by all request handlers (via Axum state).
///
/// Cheaply cloneable: it only holds `Arc`s, and nothing in it is mutable —
/// all per-request state lives in the request's scratch workspace.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration.
    pub config: Arc<Config>,
    /// External tool registry.
    pub tools: Arc<ToolRegistry>,
    /// Tool execution capability (real processes in production, scripted
    /// fakes in tests).
    pub runner: Arc<dyn ToolRunner>,
}

/// Create the Axum router with all routes.
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let max_upload = ctx.config.server.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/run-packager", post(routes_packager::run_packager))
        .route("/convert-to-hls", post(routes_packager::convert_to_hls))
        .route("/meta", post(routes_meta::stream_info))
        .route("/file-meta", post(routes_meta::file_meta))
        .route(
            "/convert-mp3-to-mp4",
            post(routes_convert::convert_mp3_to_mp4),
        )
        .route(
            "/convert-mkv-to-mp4",
            post(routes_convert::convert_mkv_to_mp4),
        )
        .route("/admin/tools", get(routes_admin::tools))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> &'static str {
    "ok"
}

/// Start the HTTP server with real tool discovery and execution.
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let tools = Arc::new(ToolRegistry::discover(&config.tools));
    for info in tools.check_all() {
        if info.available {
            tracing::info!(tool = %info.name, path = ?info.path, "external tool found");
        } else {
            tracing::warn!(tool = %info.name, "external tool not found; endpoints using it will fail");
        }
    }

    let ctx = AppContext {
        config: Arc::new(config),
        tools,
        runner: Arc::new(ProcessRunner),
    };

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
