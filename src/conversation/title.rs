//! Title derivation from the first user message.

use crate::core::config::TitleConfig;

/// Derive a conversation title from message content.
///
/// Keeps the first `max_chars` characters and appends the ellipsis marker when
/// something was cut. Counts `char`s, so multi-byte text is never split.
#[must_use]
pub fn derive_title(content: &str, config: &TitleConfig) -> String {
    let mut chars = content.chars();
    let mut title: String = chars.by_ref().take(config.max_chars).collect();
    if chars.next().is_some() {
        title.push_str(&config.ellipsis);
    }
    title
}
