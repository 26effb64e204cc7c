//! Root context owning the conversation store.
//!
//! Presentation adapters read projections from here and send their intents
//! (`new_conversation`, `select_conversation`, `send_message`) back through it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::conversation::{
    Conversation, ConversationMeta, ConversationStore, ReplyGenerator, ReplyScheduler, SharedStore,
};
use crate::core::config::DashboardConfig;
use crate::core::errors::DashboardResult;
use crate::core::ids::{ConversationId, MessageId};
use crate::view::{MessageListView, SidebarView};

/// Outcome of a `send_message` intent.
#[derive(Debug)]
pub struct SentMessage {
    /// Conversation the message went to (and the reply will go to).
    pub conversation_id: ConversationId,
    /// Identifier of the stored user message.
    pub message_id: MessageId,
    /// Task that appends the simulated reply.
    pub reply: JoinHandle<Option<MessageId>>,
}

/// Dashboard state shared by every presentation adapter.
pub struct Dashboard {
    store: SharedStore,
    replies: ReplyScheduler,
}

impl Dashboard {
    /// Build the dashboard from configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let store = if config.seed.enabled {
            ConversationStore::seeded(config.titles.clone(), &config.seed)
        } else {
            ConversationStore::new(config.titles.clone())
        };
        Ok(Self::from_store(store, config))
    }

    /// Build the dashboard around an existing store.
    #[must_use]
    pub fn from_store(store: ConversationStore, config: &DashboardConfig) -> Self {
        let store = Arc::new(RwLock::new(store));
        let replies = ReplyScheduler::new(Arc::clone(&store), config.reply.delay());
        Self { store, replies }
    }

    /// Replace the reply generator.
    ///
    /// Replies already scheduled keep counting towards [`Self::pending_replies`]
    /// and are still cancelled by [`Self::shutdown`].
    #[must_use]
    pub fn with_reply_generator(mut self, generator: Arc<dyn ReplyGenerator>) -> Self {
        self.replies.set_generator(generator);
        self
    }

    /// Create a conversation and select it.
    pub async fn new_conversation(&self) -> ConversationId {
        self.store.write().await.create_conversation()
    }

    /// Select an existing conversation; unknown ids are ignored.
    pub async fn select_conversation(&self, id: ConversationId) -> bool {
        self.store.write().await.select_conversation(id)
    }

    /// Append a user message to the current conversation and schedule the
    /// simulated reply.
    ///
    /// Returns `None`, and schedules nothing, when no conversation is current.
    /// The user message is stored before this returns.
    pub async fn send_message(&self, content: impl Into<String>) -> Option<SentMessage> {
        let content = content.into();
        let (conversation_id, message_id) = {
            let mut store = self.store.write().await;
            let conversation_id = store.current_id()?;
            let message_id = store.append_user_message(content.clone())?;
            (conversation_id, message_id)
        };
        let reply = self.replies.schedule(conversation_id, content);
        Some(SentMessage {
            conversation_id,
            message_id,
            reply,
        })
    }

    /// Sidebar projection.
    pub async fn sidebar(&self) -> SidebarView {
        SidebarView::project(&*self.store.read().await)
    }

    /// Message list projection of the current conversation.
    pub async fn message_list(&self) -> MessageListView {
        MessageListView::project(&*self.store.read().await)
    }

    /// Snapshot of one conversation.
    pub async fn conversation(&self, id: ConversationId) -> Option<Conversation> {
        self.store.read().await.get(id).cloned()
    }

    /// Identifier of the current conversation.
    pub async fn current_id(&self) -> Option<ConversationId> {
        self.store.read().await.current_id()
    }

    /// Sidebar metadata for every conversation.
    pub async fn list_meta(&self) -> Vec<ConversationMeta> {
        self.store.read().await.list_meta()
    }

    /// Number of conversations.
    pub async fn conversation_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Replies still waiting for their timer.
    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.replies.pending()
    }

    /// Cancel replies still waiting for their timer.
    pub fn shutdown(&self) {
        self.replies.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::conversation::{Role, TemplateReply};

    fn dashboard() -> Dashboard {
        Dashboard::new(&DashboardConfig::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_with_welcome_conversation() {
        let dashboard = dashboard();
        let view = dashboard.message_list().await;
        assert_eq!(view.title, "Welcome Chat");
        assert_eq!(view.messages.len(), 1);
        assert_eq!(dashboard.conversation_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unseeded_starts_empty() {
        let mut config = DashboardConfig::default();
        config.seed.enabled = false;
        let dashboard = Dashboard::new(&config).unwrap();

        assert_eq!(dashboard.conversation_count().await, 0);
        assert!(dashboard.send_message("hello").await.is_none());
        assert_eq!(dashboard.pending_replies(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = DashboardConfig::default();
        config.reply.delay_ms = 0;
        assert!(Dashboard::new(&config).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_is_two_phase() {
        let dashboard = dashboard();
        let sent = dashboard
            .send_message("Explain quicksort in detail please and also cover edge cases thoroughly")
            .await
            .unwrap();

        let view = dashboard.message_list().await;
        assert_eq!(view.messages.len(), 2);
        assert_eq!(view.title, "Explain quicksort in detail pl...");
        assert_eq!(view.messages[1].id, sent.message_id);
        assert_eq!(dashboard.pending_replies(), 1);

        let reply_id = sent.reply.await.unwrap().unwrap();
        let view = dashboard.message_list().await;
        assert_eq!(view.messages.len(), 3);
        assert_eq!(view.messages[2].id, reply_id);
        assert_eq!(view.messages[2].role, Role::Assistant);
        assert!(view.messages[2].content.contains("Explain quicksort"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_follows_origin_after_navigation() {
        let dashboard = dashboard();
        let welcome = dashboard.current_id().await.unwrap();
        let sent = dashboard.send_message("hi").await.unwrap();

        let fresh = dashboard.new_conversation().await;
        assert_eq!(dashboard.current_id().await, Some(fresh));
        sent.reply.await.unwrap();

        assert_eq!(dashboard.conversation(welcome).await.unwrap().messages().len(), 3);
        assert!(dashboard.conversation(fresh).await.unwrap().messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_unknown_keeps_selection() {
        let dashboard = dashboard();
        let before = dashboard.current_id().await;
        assert!(!dashboard.select_conversation(ConversationId::new()).await);
        assert_eq!(dashboard.current_id().await, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_conversation_meta() {
        let dashboard = dashboard();
        let id = dashboard.new_conversation().await;
        let meta = dashboard.list_meta().await;
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[1].id, id);
        assert_eq!(meta[1].title, "New Chat");
        assert_eq!(meta[1].message_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_reply() {
        let dashboard = dashboard();
        let sent = dashboard.send_message("hi").await.unwrap();
        tokio::task::yield_now().await;
        dashboard.shutdown();

        assert!(sent.reply.await.unwrap().is_none());
        assert_eq!(dashboard.message_list().await.messages.len(), 2);
    }

    struct Fixed;

    impl ReplyGenerator for Fixed {
        fn generate(&self, _user_content: &str) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_generator() {
        let dashboard = dashboard().with_reply_generator(Arc::new(Fixed));
        let sent = dashboard.send_message("anything").await.unwrap();
        sent.reply.await.unwrap();
        let view = dashboard.message_list().await;
        assert_eq!(view.messages.last().unwrap().content, "fixed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_staggered_sends_interleave_by_timer() {
        let dashboard = dashboard();
        let first = dashboard.send_message("a").await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        let second = dashboard.send_message("b").await.unwrap();

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(dashboard.message_list().await.messages.len(), 3);
        assert_eq!(dashboard.pending_replies(), 2);

        first.reply.await.unwrap().unwrap();
        assert_eq!(dashboard.message_list().await.messages.len(), 4);
        second.reply.await.unwrap().unwrap();

        let view = dashboard.message_list().await;
        let contents: Vec<&str> = view.messages.iter().map(|m| m.content.as_str()).collect();
        let greeting = DashboardConfig::default().seed.greeting;
        let reply_a = TemplateReply.generate("a");
        let reply_b = TemplateReply.generate("b");
        assert_eq!(
            contents,
            vec![greeting.as_str(), "a", "b", reply_a.as_str(), reply_b.as_str()]
        );
        let roles: Vec<Role> = view.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::Assistant, Role::User, Role::User, Role::Assistant, Role::Assistant]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_generator_swap_keeps_earlier_reply_cancellable() {
        let dashboard = dashboard();
        let sent = dashboard.send_message("hi").await.unwrap();
        tokio::task::yield_now().await;

        let dashboard = dashboard.with_reply_generator(Arc::new(Fixed));
        assert_eq!(dashboard.pending_replies(), 1);
        dashboard.shutdown();

        assert!(sent.reply.await.unwrap().is_none());
        assert_eq!(dashboard.pending_replies(), 0);
        assert_eq!(dashboard.message_list().await.messages.len(), 2);
    }
}
