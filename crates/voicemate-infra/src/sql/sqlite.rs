//! SQLite conversation repository (local runs and tests).

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};

use voicemate_core::chat::repository::ConversationRepository;
use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::RepositoryError;

use super::{chronological, connection_error, query_error, ConversationRow};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS conversations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_input TEXT,
    assistant_reply TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)";

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    options: SqliteConnectOptions,
}

impl SqliteConversationRepository {
    /// Parse a `sqlite:` URL. The database file is created on first connect.
    pub fn from_url(url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(connection_error)?
            .create_if_missing(true);
        Ok(Self { options })
    }

    async fn connect(&self) -> Result<SqliteConnection, RepositoryError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(connection_error)
    }
}

fn row_to_conversation(row: &SqliteRow) -> Result<ConversationRow, sqlx::Error> {
    Ok(ConversationRow {
        id: row.try_get("id")?,
        user_input: row.try_get("user_input")?,
        assistant_reply: row.try_get("assistant_reply")?,
        timestamp: row.try_get("timestamp")?,
    })
}

/// Close a connection after use; a failed close only gets logged.
async fn release(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Failed to close SQLite connection");
    }
}

impl ConversationRepository for SqliteConversationRepository {
    async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(CREATE_TABLE).execute(&mut conn).await;
        release(conn).await;
        result.map(|_| ()).map_err(query_error)
    }

    async fn fetch_recent(&self, limit: u32) -> Result<Vec<ConversationRecord>, RepositoryError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(super::SELECT_RECENT)
            .bind(i64::from(limit))
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        let rows = result
            .map_err(query_error)?
            .iter()
            .map(row_to_conversation)
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_error)?;
        Ok(chronological(rows))
    }

    async fn store(&self, user_input: &str, assistant_reply: &str) -> Result<(), RepositoryError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(super::INSERT_CONVERSATION)
            .bind(user_input)
            .bind(assistant_reply)
            .execute(&mut conn)
            .await;
        release(conn).await;
        result.map(|_| ()).map_err(query_error)
    }
}
