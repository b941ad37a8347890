//! Conversation record: one persisted (input, reply, timestamp) exchange.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Wire format for record timestamps (`2024-05-01 13:45:09`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single stored exchange between the user and the assistant.
///
/// `id` and `timestamp` are assigned by the store on insert. Records are
/// never updated or deleted by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: i64,
    pub user_input: String,
    pub assistant_reply: String,
    /// Serialized as `""` when the column is NULL.
    #[serde(with = "timestamp_text")]
    pub timestamp: Option<NaiveDateTime>,
}

mod timestamp_text {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
