//! Encyclopedia summary lookups.
//!
//! `SummaryProvider` is the port for "give me a short description of this
//! topic". The Wikipedia-backed implementation lives in voicemate-infra.

use voicemate_types::error::LookupError;

/// Trait for topic summary backends.
pub trait SummaryProvider: Send + Sync {
    /// Summarize `topic` in at most `sentences` sentences.
    ///
    /// Returns `LookupError::NotFound` when no page matches and
    /// `LookupError::Ambiguous` (with candidate titles, in the order the
    /// service lists them) when the topic names a disambiguation page.
    fn summarize(
        &self,
        topic: &str,
        sentences: u32,
    ) -> impl std::future::Future<Output = Result<String, LookupError>> + Send;
}
