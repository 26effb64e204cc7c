//! HTTP host for the dashboard.
//!
//! Adapts the read model and intents of [`Dashboard`] to JSON endpoints:
//! - Health and status
//! - Sidebar listing, creation and selection
//! - Current thread and message sending

pub mod routes;

pub use routes::create_router;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::errors::DashboardResult;
use crate::dashboard::Dashboard;

/// Start the HTTP server.
///
/// # Errors
/// Returns an error if the server fails to start.
pub async fn run_server(dashboard: Arc<Dashboard>, port: u16) -> DashboardResult<()> {
    run_server_with_shutdown(dashboard, port, std::future::pending()).await
}

/// Start the HTTP server with graceful shutdown support.
///
/// The server will stop accepting new connections when `shutdown_signal`
/// completes; simulated replies still waiting are then cancelled.
///
/// # Errors
/// Returns an error if the server fails to start.
pub async fn run_server_with_shutdown<F>(
    dashboard: Arc<Dashboard>,
    port: u16,
    shutdown_signal: F,
) -> DashboardResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app: Router = create_router(Arc::clone(&dashboard))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Chat dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    dashboard.shutdown();
    Ok(())
}
