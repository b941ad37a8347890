//! Conversation service: reply generation plus best-effort persistence.
//!
//! Store failures never reach the caller. Schema setup and inserts log and
//! carry on; history reads fall back to an empty list. The only error a
//! caller sees is empty input.

use tracing::{error, info};

use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::ChatError;

use crate::chat::repository::ConversationRepository;
use crate::lookup::SummaryProvider;
use crate::reply::generator::ReplyGenerator;

/// Number of exchanges returned by the history endpoint.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Orchestrates one request: validate, reply, store.
///
/// Generic over `ConversationRepository` and `SummaryProvider` to maintain
/// clean architecture (voicemate-core never depends on voicemate-infra).
pub struct ConversationService<R: ConversationRepository, S: SummaryProvider> {
    repo: R,
    generator: ReplyGenerator<S>,
}

impl<R: ConversationRepository, S: SummaryProvider> ConversationService<R, S> {
    pub fn new(repo: R, generator: ReplyGenerator<S>) -> Self {
        Self { repo, generator }
    }

    /// Access the conversation repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Access the reply generator.
    pub fn generator(&self) -> &ReplyGenerator<S> {
        &self.generator
    }

    /// Create the conversations table if needed. Failures are only logged.
    ///
    /// Returns whether the schema is in place, for callers that report it.
    pub async fn ensure_schema(&self) -> bool {
        match self.repo.ensure_schema().await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to ensure conversations table exists");
                false
            }
        }
    }

    /// The last `limit` exchanges, oldest first. Empty if the store fails.
    pub async fn recent_history(&self, limit: u32) -> Vec<ConversationRecord> {
        match self.repo.fetch_recent(limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, limit, "Failed to fetch conversation history");
                Vec::new()
            }
        }
    }

    /// Handle one user message and return the assistant's reply.
    ///
    /// The text is trimmed first; blank input is rejected before the
    /// generator or the store is touched. The exchange is stored at most
    /// once, and a failed insert does not affect the returned reply.
    pub async fn process(&self, text: &str) -> Result<String, ChatError> {
        let user_text = text.trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let reply = self.generator.generate_reply(user_text).await;
        self.record_exchange(user_text, &reply).await;
        Ok(reply)
    }

    async fn record_exchange(&self, user_text: &str, reply: &str) {
        match self.repo.store(user_text, reply).await {
            Ok(()) => info!(chars = user_text.len(), "Conversation stored"),
            Err(e) => error!(error = %e, "Failed to store conversation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use voicemate_types::error::{LookupError, RepositoryError};

    use crate::reply::rules;

    #[derive(Default)]
    struct MockRepository {
        rows: Mutex<Vec<ConversationRecord>>,
        schema_calls: Mutex<u32>,
        broken: bool,
    }

    impl MockRepository {
        fn broken() -> Self {
            Self {
                broken: true,
                ..Default::default()
            }
        }

        fn rows(&self) -> Vec<ConversationRecord> {
            self.rows.lock().unwrap().clone()
        }
    }

    impl ConversationRepository for MockRepository {
        async fn ensure_schema(&self) -> Result<(), RepositoryError> {
            *self.schema_calls.lock().unwrap() += 1;
            if self.broken {
                return Err(RepositoryError::Connection("refused".into()));
            }
            Ok(())
        }

        async fn fetch_recent(
            &self,
            limit: u32,
        ) -> Result<Vec<ConversationRecord>, RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Connection("refused".into()));
            }
            let rows = self.rows.lock().unwrap();
            let skip = rows.len().saturating_sub(limit as usize);
            Ok(rows[skip..].to_vec())
        }

        async fn store(
            &self,
            user_input: &str,
            assistant_reply: &str,
        ) -> Result<(), RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Connection("refused".into()));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(ConversationRecord {
                id,
                user_input: user_input.to_string(),
                assistant_reply: assistant_reply.to_string(),
                timestamp: None,
            });
            Ok(())
        }
    }

    struct NoSummaries;

    impl SummaryProvider for NoSummaries {
        async fn summarize(&self, _topic: &str, _sentences: u32) -> Result<String, LookupError> {
            Err(LookupError::NotFound)
        }
    }

    fn service(repo: MockRepository) -> ConversationService<MockRepository, NoSummaries> {
        ConversationService::new(repo, ReplyGenerator::new(None, NoSummaries))
    }

    #[tokio::test]
    async fn test_process_stores_trimmed_exchange() {
        let svc = service(MockRepository::default());

        let reply = svc.process("  hello  ").await.unwrap();
        assert_eq!(reply, rules::GREETING_REPLY);

        let rows = svc.repo().rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_input, "hello");
        assert_eq!(rows[0].assistant_reply, rules::GREETING_REPLY);
    }

    #[tokio::test]
    async fn test_process_rejects_blank_without_storing() {
        let svc = service(MockRepository::default());

        assert_eq!(svc.process("").await, Err(ChatError::EmptyInput));
        assert_eq!(svc.process(" \n\t ").await, Err(ChatError::EmptyInput));
        assert!(svc.repo().rows().is_empty());
    }

    #[tokio::test]
    async fn test_process_survives_broken_store() {
        let svc = service(MockRepository::broken());

        let reply = svc.process("hello").await.unwrap();
        assert_eq!(reply, rules::GREETING_REPLY);
    }

    #[tokio::test]
    async fn test_history_empty_on_broken_store() {
        let svc = service(MockRepository::broken());
        assert!(svc.recent_history(DEFAULT_HISTORY_LIMIT).await.is_empty());
    }

    #[tokio::test]
    async fn test_history_returns_most_recent() {
        let svc = service(MockRepository::default());
        for i in 0..12 {
            svc.process(&format!("message {i}")).await.unwrap();
        }

        let history = svc.recent_history(DEFAULT_HISTORY_LIMIT).await;
        assert_eq!(history.len(), 10);
        assert_eq!(history[0].user_input, "message 2");
        assert_eq!(history[9].user_input, "message 11");
    }

    #[tokio::test]
    async fn test_ensure_schema_reports_outcome() {
        let ok = service(MockRepository::default());
        assert!(ok.ensure_schema().await);
        assert_eq!(*ok.repo().schema_calls.lock().unwrap(), 1);

        let broken = service(MockRepository::broken());
        assert!(!broken.ensure_schema().await);
    }
}
