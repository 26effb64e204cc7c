//! In-memory conversation store.
//!
//! Owns the ordered list of conversations and the current-selection pointer.
//! Every mutation goes through this type; invalid input (unknown id, nothing
//! selected) is a silent no-op rather than an error.

use tracing::{debug, info, warn};

use crate::core::config::{SeedConfig, TitleConfig};
use crate::core::ids::{ConversationId, MessageId};

use super::title::derive_title;
use super::types::{Conversation, ConversationMeta, Message};

/// Ordered set of conversations plus the current selection.
#[derive(Clone, Debug)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    current: Option<ConversationId>,
    titles: TitleConfig,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(TitleConfig::default())
    }
}

impl ConversationStore {
    /// Create an empty store with nothing selected.
    #[must_use]
    pub const fn new(titles: TitleConfig) -> Self {
        Self {
            conversations: Vec::new(),
            current: None,
            titles,
        }
    }

    /// Create a store holding the welcome conversation, selected.
    ///
    /// The greeting is the conversation's only message, so the first user
    /// message sent to it rewrites the title.
    #[must_use]
    pub fn seeded(titles: TitleConfig, seed: &SeedConfig) -> Self {
        let mut store = Self::new(titles);
        let welcome = Conversation::with_seed(
            seed.title.clone(),
            Message::assistant(seed.greeting.clone()),
        );
        store.current = Some(welcome.id());
        store.conversations.push(welcome);
        store
    }

    /// Create a new empty conversation at the end of the list and select it.
    pub fn create_conversation(&mut self) -> ConversationId {
        let conversation = Conversation::new(self.titles.default_title.clone());
        let id = conversation.id();
        self.conversations.push(conversation);
        self.current = Some(id);
        info!(conversation_id = %id, total = self.conversations.len(), "Created conversation");
        id
    }

    /// Select `id` if it names an existing conversation.
    ///
    /// Returns whether the selection changed hands to `id`; unknown ids leave
    /// the selection untouched.
    pub fn select_conversation(&mut self, id: ConversationId) -> bool {
        if self.get(id).is_none() {
            debug!(conversation_id = %id, "Ignoring selection of unknown conversation");
            return false;
        }
        self.current = Some(id);
        debug!(conversation_id = %id, "Selected conversation");
        true
    }

    /// Append a user message to the current conversation.
    ///
    /// When the conversation held exactly one message before the append, its
    /// title is rewritten from `content`. Returns `None` when nothing is
    /// selected.
    pub fn append_user_message(&mut self, content: impl Into<String>) -> Option<MessageId> {
        let Some(current) = self.current else {
            debug!("No current conversation, dropping user message");
            return None;
        };
        let titles = &self.titles;
        let conversation = self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id() == current)?;

        let message = Message::user(content);
        let message_id = message.id;
        if conversation.messages().len() == 1 {
            let title = derive_title(&message.content, titles);
            debug!(conversation_id = %current, %title, "Retitled conversation");
            conversation.set_title(title);
        }
        conversation.push(message);
        debug!(
            conversation_id = %current,
            %message_id,
            count = conversation.messages().len(),
            "Appended user message"
        );
        Some(message_id)
    }

    /// Append an assistant message to `conversation_id`, selected or not.
    ///
    /// Returns `None` when the conversation does not exist.
    pub fn append_assistant_message(
        &mut self,
        conversation_id: ConversationId,
        content: impl Into<String>,
    ) -> Option<MessageId> {
        let Some(conversation) = self.get_mut(conversation_id) else {
            warn!(%conversation_id, "Assistant message for unknown conversation dropped");
            return None;
        };
        let message = Message::assistant(content);
        let message_id = message.id;
        conversation.push(message);
        debug!(%conversation_id, %message_id, "Appended assistant message");
        Some(message_id)
    }

    /// All conversations in creation order.
    #[must_use]
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Identifier of the current conversation.
    #[must_use]
    pub const fn current_id(&self) -> Option<ConversationId> {
        self.current
    }

    /// The current conversation, if any.
    #[must_use]
    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.current.and_then(|id| self.get(id))
    }

    /// Look up a conversation by id.
    #[must_use]
    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id() == id)
    }

    /// Sidebar metadata for every conversation, in list order.
    #[must_use]
    pub fn list_meta(&self) -> Vec<ConversationMeta> {
        self.conversations.iter().map(ConversationMeta::from).collect()
    }

    /// Number of conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether the store holds no conversations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn get_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|conversation| conversation.id() == id)
    }
}
