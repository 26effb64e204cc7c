//! Startup helpers for the chat dashboard server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::core::config::DashboardConfig;
use crate::core::errors::DashboardResult;
use crate::dashboard::Dashboard;
use crate::server;

/// Run the server until Ctrl-C (used by the `chat-dashboard` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting chat dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = DashboardConfig::from_env();
    tracing::info!(
        port = config.server.port,
        reply_delay_ms = config.reply.delay_ms,
        seed = config.seed.enabled,
        "Loaded configuration"
    );

    let dashboard = match initialize(&config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to create dashboard: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let port = config.server.port;
    if let Err(e) = rt.block_on(server::run_server_with_shutdown(
        dashboard,
        port,
        shutdown_signal(),
    )) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    tracing::info!("Chat dashboard stopped");
    ExitCode::SUCCESS
}

/// Build the dashboard without starting the server.
///
/// # Errors
/// Returns an error if the configuration is invalid.
pub fn initialize(config: &DashboardConfig) -> DashboardResult<Arc<Dashboard>> {
    Dashboard::new(config).map(Arc::new)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
