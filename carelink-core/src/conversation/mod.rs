//! Chatbot conversation state
//!
//! Held in memory only; a conversation lasts until it is cleared or the
//! process exits.

pub mod store;

pub use store::{ConversationContext, ConversationStore};
