use thiserror::Error;

/// Errors from repository operations (used by trait definitions in voicemate-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from the encyclopedia summary lookup.
///
/// Each variant maps to one fixed user-facing reply in the reply generator.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no page matches the topic")]
    NotFound,

    #[error("topic is ambiguous ({} options)", options.len())]
    Ambiguous { options: Vec<String> },

    #[error("lookup request failed: {0}")]
    Network(String),

    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// Errors from the conversation service that are visible to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("No text provided.")]
    EmptyInput,
}
