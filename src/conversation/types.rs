//! Conversation and message model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::ids::{ConversationId, MessageId};

/// Author of a message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Typed by the person using the dashboard.
    User,
    /// Produced by the (simulated) assistant.
    Assistant,
}

impl Role {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(value.to_string()),
        }
    }
}

/// A single turn in a conversation. Immutable once built.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// Author of the message.
    pub role: Role,
    /// Text payload, stored verbatim.
    pub content: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message stamped with the current time.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Build an assistant message stamped with the current time.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// An ordered, append-only thread of messages.
///
/// Fields are private so the only mutations are the ones
/// [`ConversationStore`](super::store::ConversationStore) performs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    title: String,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create an empty conversation.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ConversationId::new(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a conversation holding one seed message.
    #[must_use]
    pub fn with_seed(title: impl Into<String>, seed: Message) -> Self {
        let mut conversation = Self::new(title);
        conversation.messages.push(seed);
        conversation
    }

    /// Conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Messages in display order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last message, or creation time when empty.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.messages
            .last()
            .map_or(self.created_at, |message| message.timestamp)
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }
}

/// Metadata for a conversation displayed in the sidebar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationMeta {
    /// Unique identifier.
    pub id: ConversationId,
    /// Display title.
    pub title: String,
    /// Creation timestamp in milliseconds since Unix epoch.
    pub created_at: i64,
    /// Last activity timestamp in milliseconds since Unix epoch.
    pub updated_at: i64,
    /// Number of messages in the conversation.
    pub message_count: usize,
}

impl From<&Conversation> for ConversationMeta {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id(),
            title: conversation.title().to_string(),
            created_at: conversation.created_at().timestamp_millis(),
            updated_at: conversation.updated_at().timestamp_millis(),
            message_count: conversation.messages().len(),
        }
    }
}
