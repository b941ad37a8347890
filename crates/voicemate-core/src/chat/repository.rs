//! ConversationRepository trait definition.
//!
//! The store behind this trait holds a single `conversations` table. Each
//! method is one statement on its own connection; implementations must not
//! hold connections between calls.

use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::RepositoryError;

/// Repository trait for conversation record persistence.
///
/// Implementations live in voicemate-infra (`MySqlConversationRepository`,
/// `SqliteConversationRepository`). Uses native async fn in traits (RPITIT,
/// Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Create the conversations table if it does not exist. Idempotent.
    fn ensure_schema(
        &self,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The most recent `limit` records, returned oldest first.
    ///
    /// Selection orders by timestamp DESC then id DESC; the result is
    /// reversed before returning.
    fn fetch_recent(
        &self,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationRecord>, RepositoryError>> + Send;

    /// Insert one exchange. The store assigns `id` and `timestamp`.
    fn store(
        &self,
        user_input: &str,
        assistant_reply: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
