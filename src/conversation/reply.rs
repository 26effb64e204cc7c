//! Simulated assistant replies.
//!
//! Each user message schedules one independent task that sleeps for the
//! configured delay and then appends a templated assistant message to the
//! conversation captured at send time. Replies are never retried and never
//! reordered relative to each other beyond their own timers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::ids::{ConversationId, MessageId};

use super::store::ConversationStore;

/// Store handle shared between the root context and pending replies.
pub type SharedStore = Arc<RwLock<ConversationStore>>;

/// Produces assistant reply text for a user message.
pub trait ReplyGenerator: Send + Sync {
    /// Build the reply for `user_content`.
    fn generate(&self, user_content: &str) -> String;
}

/// Deterministic placeholder that echoes the user message.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateReply;

impl ReplyGenerator for TemplateReply {
    fn generate(&self, user_content: &str) -> String {
        format!(
            "This is a demo response. In a real application, this would connect to an LLM API \
             (like OpenAI, Anthropic, or a local model) to generate intelligent responses to: \
             \"{user_content}\""
        )
    }
}

/// Schedules delayed assistant replies onto a shared store.
pub struct ReplyScheduler {
    store: SharedStore,
    delay: Duration,
    generator: Arc<dyn ReplyGenerator>,
    pending: Arc<AtomicUsize>,
    shutdown: watch::Sender<bool>,
}

impl ReplyScheduler {
    /// Create a scheduler using the [`TemplateReply`] generator.
    #[must_use]
    pub fn new(store: SharedStore, delay: Duration) -> Self {
        Self::with_generator(store, delay, Arc::new(TemplateReply))
    }

    /// Create a scheduler with a custom reply generator.
    #[must_use]
    pub fn with_generator(
        store: SharedStore,
        delay: Duration,
        generator: Arc<dyn ReplyGenerator>,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            store,
            delay,
            generator,
            pending: Arc::new(AtomicUsize::new(0)),
            shutdown,
        }
    }

    /// Configured reply delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Swap the generator used by replies scheduled from now on.
    ///
    /// Replies already waiting keep the generator they were scheduled with,
    /// and stay counted by [`Self::pending`] and cancellable by
    /// [`Self::shutdown`].
    pub fn set_generator(&mut self, generator: Arc<dyn ReplyGenerator>) {
        self.generator = generator;
    }

    /// Number of replies waiting for their timer.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Schedule one reply to `user_content` on `conversation_id`.
    ///
    /// The task resolves to the appended message id, or `None` if the
    /// conversation vanished or the scheduler was shut down first. Must be
    /// called from within a tokio runtime.
    pub fn schedule(
        &self,
        conversation_id: ConversationId,
        user_content: String,
    ) -> JoinHandle<Option<MessageId>> {
        let store = Arc::clone(&self.store);
        let generator = Arc::clone(&self.generator);
        let pending = Arc::clone(&self.pending);
        let mut shutdown = self.shutdown.subscribe();
        let delay = self.delay;

        pending.fetch_add(1, Ordering::SeqCst);
        debug!(%conversation_id, ?delay, "Scheduled assistant reply");

        tokio::spawn(async move {
            let stopped = async {
                // A dropped sender is not a shutdown request: keep waiting.
                let closed = shutdown.wait_for(|flag| *flag).await.is_err();
                if closed {
                    std::future::pending::<()>().await;
                }
            };

            let appended = tokio::select! {
                () = tokio::time::sleep(delay) => {
                    let reply = generator.generate(&user_content);
                    store
                        .write()
                        .await
                        .append_assistant_message(conversation_id, reply)
                }
                () = stopped => {
                    debug!(%conversation_id, "Assistant reply cancelled by shutdown");
                    None
                }
            };

            pending.fetch_sub(1, Ordering::SeqCst);
            appended
        })
    }

    /// Cancel every reply still waiting for its timer.
    ///
    /// Replies scheduled afterwards are cancelled immediately.
    pub fn shutdown(&self) {
        self.shutdown.send_modify(|stopped| *stopped = true);
        debug!(pending = self.pending(), "Reply scheduler shutting down");
    }
}
