//! Core dashboard types: configuration, errors and identifiers.

pub mod config;
pub mod errors;
pub mod ids;

pub use config::{DashboardConfig, ReplyConfig, SeedConfig, ServerConfig, TitleConfig};
pub use errors::{DashboardError, DashboardResult};
pub use ids::{ConversationId, MessageId};
