//! Relational storage for conversation records.
//!
//! Both backends open a fresh connection per operation, run one statement
//! and close the connection again. Repositories hold connection options,
//! never connections.

pub mod mysql;
pub mod sqlite;

use chrono::NaiveDateTime;
use secrecy::ExposeSecret;

use voicemate_core::chat::repository::ConversationRepository;
use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::RepositoryError;

use crate::config::DatabaseSettings;

use self::mysql::MySqlConversationRepository;
use self::sqlite::SqliteConversationRepository;

pub(crate) const SELECT_RECENT: &str = "SELECT id, user_input, assistant_reply, timestamp \
    FROM conversations ORDER BY timestamp DESC, id DESC LIMIT ?";

pub(crate) const INSERT_CONVERSATION: &str =
    "INSERT INTO conversations (user_input, assistant_reply) VALUES (?, ?)";

/// Raw column values of one `conversations` row.
pub(crate) struct ConversationRow {
    pub id: i64,
    pub user_input: Option<String>,
    pub assistant_reply: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

impl ConversationRow {
    pub fn into_record(self) -> ConversationRecord {
        ConversationRecord {
            id: self.id,
            user_input: self.user_input.unwrap_or_default(),
            assistant_reply: self.assistant_reply.unwrap_or_default(),
            timestamp: self.timestamp,
        }
    }
}

/// Rows come back newest first; callers want oldest first.
pub(crate) fn chronological(rows: Vec<ConversationRow>) -> Vec<ConversationRecord> {
    rows.into_iter().rev().map(ConversationRow::into_record).collect()
}

pub(crate) fn connection_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Connection(e.to_string())
}

pub(crate) fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Conversation repository over whichever backend was configured.
pub enum SqlConversationRepository {
    MySql(MySqlConversationRepository),
    Sqlite(SqliteConversationRepository),
}

impl SqlConversationRepository {
    /// Build the repository for `settings`. No connection is opened here.
    pub fn from_settings(settings: &DatabaseSettings) -> Result<Self, RepositoryError> {
        match settings {
            DatabaseSettings::MySql {
                host,
                port,
                user,
                password,
                database,
            } => Ok(Self::MySql(MySqlConversationRepository::new(
                host,
                *port,
                user,
                password.expose_secret(),
                database,
            ))),
            DatabaseSettings::Sqlite { url } => {
                SqliteConversationRepository::from_url(url).map(Self::Sqlite)
            }
        }
    }

    /// Short backend name for logs and status output.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
            Self::Sqlite(_) => "sqlite",
        }
    }
}

impl ConversationRepository for SqlConversationRepository {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        match self {
            Self::MySql(repo) => repo.ensure_schema().await,
            Self::Sqlite(repo) => repo.ensure_schema().await,
        }
    }

    async fn fetch_recent(&self, limit: u32) -> Result<Vec<ConversationRecord>, RepositoryError> {
        match self {
            Self::MySql(repo) => repo.fetch_recent(limit).await,
            Self::Sqlite(repo) => repo.fetch_recent(limit).await,
        }
    }

    async fn store(&self, user_input: &str, assistant_reply: &str) -> Result<(), RepositoryError> {
        match self {
            Self::MySql(repo) => repo.store(user_input, assistant_reply).await,
            Self::Sqlite(repo) => repo.store(user_input, assistant_reply).await,
        }
    }
}
