//! HTTP layer for Voicemate.
//!
//! Axum router serving the client page and a small JSON API, with CORS and
//! request tracing.

pub mod error;
pub mod handlers;
pub mod router;
