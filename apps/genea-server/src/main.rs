//! Genea web backend server.
//!
//! Starts an Axum HTTP server with:
//! - The REST API under `/api/v1`
//! - Health check at `/healthz`
//! - CORS middleware
//! - Structured tracing
//! - Graceful shutdown on SIGINT/SIGTERM

mod config;

use std::net::SocketAddr;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use genea_api::{AppState, build_router};
use genea_db::repo::{connect, run_migrations};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    // ── Load configuration ───────────────────────────────────────────
    let cfg = ServerConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });

    // ── Initialize tracing ───────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();

    info!(
        host = %cfg.host,
        port = %cfg.port,
        log_level = %cfg.log_level,
        "Starting Genea server"
    );

    // ── Connect to database ──────────────────────────────────────────
    let db = connect(&cfg.database_url).await.unwrap_or_else(|e| {
        error!(%e, "Failed to connect to database");
        std::process::exit(1);
    });

    // ── Run migrations ───────────────────────────────────────────────
    run_migrations(&db).await.unwrap_or_else(|e| {
        error!(%e, "Failed to run migrations");
        std::process::exit(1);
    });

    // ── Build application router ─────────────────────────────────────
    let state = AppState::new(db);
    let api_router = build_router(state);

    // CORS
    let cors = if cfg.cors_origin == "*" {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(
                cfg.cors_origin
                    .parse::<HeaderValue>()
                    .unwrap_or_else(|e| {
                        error!(%e, "invalid CORS origin");
                        std::process::exit(1);
                    }),
            )
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
    };

    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest("/api/v1", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ── Serve ────────────────────────────────────────────────────────
    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .unwrap_or_else(|e| {
            error!(%e, "invalid bind address");
            std::process::exit(1);
        });
    let listener = TcpListener::bind(addr).await.unwrap_or_else(|e| {
        error!(%e, "failed to bind");
        std::process::exit(1);
    });
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!(%e, "server error");
            std::process::exit(1);
        });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler")
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
