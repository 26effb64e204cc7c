//! Message list projection for the current conversation.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::conversation::{ConversationStore, Message, Role};
use crate::core::ids::{ConversationId, MessageId};

/// Header shown when no conversation is selected.
pub const FALLBACK_TITLE: &str = "Chat";

const TIME_FORMAT: &str = "%H:%M:%S";

/// One rendered message.
#[derive(Clone, Debug, Serialize)]
pub struct MessageBubble {
    /// Message identifier.
    pub id: MessageId,
    /// Author role.
    pub role: Role,
    /// Verbatim content.
    pub content: String,
    /// Local time of day the message was created.
    pub time: String,
}

impl From<&Message> for MessageBubble {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content.clone(),
            time: format_time(message.timestamp),
        }
    }
}

/// Read-only view of the thread being displayed.
#[derive(Clone, Debug, Serialize)]
pub struct MessageListView {
    /// Conversation being displayed.
    pub conversation_id: Option<ConversationId>,
    /// Header title.
    pub title: String,
    /// Messages in display order.
    pub messages: Vec<MessageBubble>,
}

impl MessageListView {
    /// Project the current conversation, or an empty view titled
    /// [`FALLBACK_TITLE`] when nothing is selected.
    #[must_use]
    pub fn project(store: &ConversationStore) -> Self {
        store.current_conversation().map_or_else(
            || Self {
                conversation_id: None,
                title: FALLBACK_TITLE.to_string(),
                messages: Vec::new(),
            },
            |conversation| Self {
                conversation_id: Some(conversation.id()),
                title: conversation.title().to_string(),
                messages: conversation
                    .messages()
                    .iter()
                    .map(MessageBubble::from)
                    .collect(),
            },
        )
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIME_FORMAT).to_string()
}
