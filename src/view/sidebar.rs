//! Sidebar projection: conversation list plus current selection.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::conversation::{Conversation, ConversationStore};
use crate::core::ids::ConversationId;

/// Date format used under each sidebar entry.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of the sidebar.
#[derive(Clone, Debug, Serialize)]
pub struct SidebarItem {
    /// Conversation identifier, sent back with the `select` intent.
    pub id: ConversationId,
    /// Display title.
    pub title: String,
    /// Local creation date.
    pub created: String,
    /// Whether this row is the current conversation.
    pub selected: bool,
}

impl SidebarItem {
    /// Project one conversation.
    #[must_use]
    pub fn project(conversation: &Conversation, current: Option<ConversationId>) -> Self {
        Self {
            id: conversation.id(),
            title: conversation.title().to_string(),
            created: format_date(conversation.created_at()),
            selected: current == Some(conversation.id()),
        }
    }
}

/// Read-only sidebar state.
#[derive(Clone, Debug, Serialize)]
pub struct SidebarView {
    /// Identifier of the current conversation.
    pub current_id: Option<ConversationId>,
    /// Conversations in creation order.
    pub items: Vec<SidebarItem>,
}

impl SidebarView {
    /// Project the store into sidebar rows.
    #[must_use]
    pub fn project(store: &ConversationStore) -> Self {
        let current_id = store.current_id();
        Self {
            current_id,
            items: store
                .conversations()
                .iter()
                .map(|conversation| SidebarItem::project(conversation, current_id))
                .collect(),
        }
    }
}

fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DATE_FORMAT).to_string()
}
