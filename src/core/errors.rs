//! Error types for the chat dashboard.

use thiserror::Error;

/// Dashboard error type.
///
/// Store operations never produce one of these; only configuration and the
/// HTTP host can fail.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// I/O error (socket bind, serve loop).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
