//! Infrastructure layer for Voicemate.
//!
//! Implementations of the ports defined in `voicemate-core`: MySQL and SQLite
//! conversation storage, the OpenAI-compatible language-model provider, and
//! the Wikipedia summary client. Also owns environment configuration.

pub mod config;
pub mod llm;
pub mod sql;
pub mod wikipedia;
