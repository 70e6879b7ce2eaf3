//! Conversation data structures

use serde::{Deserialize, Serialize};

/// Rolling two-slot context handed to the assistant with the next prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Last thing the user said
    pub user: String,
    /// Last thing the assistant said
    pub assistant: String,
}

impl ConversationContext {
    /// Create a context from both slots
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }

    /// Whether both slots are empty
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.assistant.is_empty()
    }
}

/// Chatbot conversation state
///
/// Messages are opaque to the store: anything the view layer wants to render
/// can be appended. Defaults to raw JSON values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationStore<M = serde_json::Value> {
    messages: Vec<M>,
    chat_history: ConversationContext,
}

impl<M> Default for ConversationStore<M> {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            chat_history: ConversationContext::default(),
        }
    }
}

impl<M> ConversationStore<M> {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; no bound, no deduplication
    pub fn add_message(&mut self, message: M) {
        self.messages.push(message);
    }

    /// Replace the rolling context wholesale
    pub fn update_chat_history(&mut self, context: ConversationContext) {
        self.chat_history = context;
    }

    /// Drop all messages and reset the context to empty strings
    pub fn clear_chat(&mut self) {
        self.messages.clear();
        self.chat_history = ConversationContext::default();
    }

    /// Messages in insertion order
    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    /// Current rolling context
    pub fn chat_history(&self) -> &ConversationContext {
        &self.chat_history
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_conversation_is_empty() {
        let store: ConversationStore = ConversationStore::new();
        assert!(store.is_empty());
        assert!(store.chat_history().is_empty());
    }

    #[test]
    fn test_add_message_keeps_order_and_duplicates() {
        let mut store = ConversationStore::new();
        store.add_message(json!({"role": "user", "text": "hi"}));
        store.add_message(json!({"role": "bot", "text": "hello"}));
        store.add_message(json!({"role": "user", "text": "hi"}));

        assert_eq!(store.len(), 3);
        assert_eq!(store.messages()[0]["text"], "hi");
        assert_eq!(store.messages()[1]["role"], "bot");
        assert_eq!(store.messages()[0], store.messages()[2]);
    }

    #[test]
    fn test_clear_then_add_counts_only_new_messages() {
        let mut store = ConversationStore::new();
        for i in 0..5 {
            store.add_message(json!(i));
        }
        store.update_chat_history(ConversationContext::new("q", "a"));

        for n in [0usize, 1, 7] {
            store.clear_chat();
            assert!(store.chat_history().is_empty());
            for i in 0..n {
                store.add_message(json!(i));
            }
            assert_eq!(store.len(), n);
        }
    }

    #[test]
    fn test_update_chat_history_replaces_and_is_idempotent() {
        let mut store: ConversationStore<String> = ConversationStore::new();
        store.update_chat_history(ConversationContext::new("first", "reply"));

        let context = ConversationContext::new("second", "");
        store.update_chat_history(context.clone());
        let once = store.chat_history().clone();
        store.update_chat_history(context.clone());

        assert_eq!(store.chat_history(), &once);
        assert_eq!(store.chat_history(), &context);
        assert_eq!(store.chat_history().assistant, "");
    }

    #[test]
    fn test_typed_messages() {
        #[derive(Debug, Clone, PartialEq)]
        struct Bubble(&'static str);

        let mut store = ConversationStore::new();
        store.add_message(Bubble("hello"));
        assert_eq!(store.messages(), &[Bubble("hello")]);
    }
}
