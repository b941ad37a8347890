//! Reply generation logic and port trait definitions for Voicemate.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the rule-based reply generator and
//! the conversation service that ties them together. It depends only on
//! `voicemate-types` -- never on `voicemate-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod lookup;
pub mod reply;
