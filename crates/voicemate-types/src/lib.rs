//! Shared domain types for Voicemate.
//!
//! Conversation records, LLM request/response shapes, and the error enums
//! returned at each external call site (store, language model, encyclopedia).
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod conversation;
pub mod error;
pub mod llm;
