//! Read-only projections consumed by the presentation layer.

pub mod message_list;
pub mod sidebar;

pub use message_list::{MessageBubble, MessageListView, FALLBACK_TITLE};
pub use sidebar::{SidebarItem, SidebarView};
