//! Application state wiring all services together.
//!
//! `ConversationService` is generic over its repository and summary
//! provider; AppState pins it to the concrete infra implementations.

use std::sync::Arc;

use tracing::info;

use voicemate_core::chat::service::ConversationService;
use voicemate_core::reply::generator::ReplyGenerator;
use voicemate_infra::config::AppConfig;
use voicemate_infra::llm::optional_provider;
use voicemate_infra::sql::SqlConversationRepository;
use voicemate_infra::wikipedia::WikipediaClient;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteConversationService =
    ConversationService<SqlConversationRepository, WikipediaClient>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteConversationService>,
}

impl AppState {
    /// Wire the service from configuration. Opens no connections.
    pub fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = SqlConversationRepository::from_settings(&config.database)?;
        let wikipedia = WikipediaClient::new(config.lookup.api_url.clone())?;
        let llm = optional_provider(config.llm.as_ref());

        info!(
            backend = repo.backend(),
            llm = llm.as_ref().map(|p| p.name()).unwrap_or("disabled"),
            wikipedia = %wikipedia.api_url(),
            "Voicemate configured"
        );

        let generator = ReplyGenerator::new(llm, wikipedia);
        Ok(Self::new(ConversationService::new(repo, generator)))
    }

    pub fn new(service: ConcreteConversationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
