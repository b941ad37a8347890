//! Conversation persistence abstractions and the request-level service.
//!
//! `ConversationRepository` is the storage port; `ConversationService`
//! applies the best-effort persistence policy on top of it.

pub mod repository;
pub mod service;
