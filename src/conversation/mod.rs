//! Conversation state: the model, the store that mutates it, and the
//! delayed reply simulator.

pub mod reply;
pub mod store;
pub mod title;
pub mod types;

pub use reply::{ReplyGenerator, ReplyScheduler, SharedStore, TemplateReply};
pub use store::ConversationStore;
pub use title::derive_title;
pub use types::{Conversation, ConversationMeta, Message, Role};
