//! MySQL conversation repository.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};

use voicemate_core::chat::repository::ConversationRepository;
use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::RepositoryError;

use super::{chronological, connection_error, query_error, ConversationRow};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS conversations (
    id BIGINT PRIMARY KEY AUTO_INCREMENT,
    user_input TEXT,
    assistant_reply TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

/// MySQL-backed implementation of `ConversationRepository`.
///
/// Does NOT derive Debug: the connect options carry the password.
pub struct MySqlConversationRepository {
    options: MySqlConnectOptions,
}

impl MySqlConversationRepository {
    pub fn new(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        let options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(user)
            .password(password)
            .database(database)
            .charset("utf8mb4");
        Self { options }
    }

    async fn connect(&self) -> Result<MySqlConnection, RepositoryError> {
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(connection_error)
    }
}

fn row_to_conversation(row: &MySqlRow) -> Result<ConversationRow, sqlx::Error> {
    Ok(ConversationRow {
        id: row.try_get("id")?,
        user_input: row.try_get("user_input")?,
        assistant_reply: row.try_get("assistant_reply")?,
        timestamp: row.try_get("timestamp")?,
    })
}

async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Failed to close MySQL connection");
    }
}

impl ConversationRepository for MySqlConversationRepository {
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
        // Autocommit: the insert is committed when the statement completes.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_a_connection_error() {
        // Port 1 on loopback refuses connections.
        let repo = MySqlConversationRepository::new("127.0.0.1", 1, "root", "", "LearningProject");

        let err = repo.fetch_recent(10).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)), "got {err:?}");

        let err = repo.store("hello", "hi").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)), "got {err:?}");
    }
}
