//! The reply generator.
//!
//! Tries the configured language model first. Any error or an empty answer
//! drops through to the keyword rules in [`super::rules`], which may in turn
//! ask the summary provider about a topic. Nothing here returns an error:
//! every failure degrades to a fixed reply.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use voicemate_types::error::LookupError;
use voicemate_types::llm::{CompletionRequest, Message, MessageRole};

use super::rules::{self, Rule};
use crate::llm::box_provider::BoxLlmProvider;
use crate::lookup::SummaryProvider;

/// System instruction sent with every language-model request.
pub const SYSTEM_PROMPT: &str = "You are a concise, helpful voice assistant. \
    Keep responses under 120 words unless asked for detail.";

pub const MAX_REPLY_TOKENS: u32 = 300;

pub const TEMPERATURE: f64 = 0.7;

/// Sentences requested from the summary provider.
pub const SUMMARY_SENTENCES: u32 = 2;

/// Produces a reply for every input.
pub struct ReplyGenerator<S: SummaryProvider> {
    llm: Option<BoxLlmProvider>,
    summarizer: S,
}

impl<S: SummaryProvider> ReplyGenerator<S> {
    /// `llm` is `None` when no language-model API key is configured.
    pub fn new(llm: Option<BoxLlmProvider>, summarizer: S) -> Self {
        Self { llm, summarizer }
    }

    /// Name of the language-model provider in use, if any.
    pub fn llm_name(&self) -> Option<&str> {
        self.llm.as_ref().map(|p| p.name())
    }

    /// Generate a reply using the local clock for time/date answers.
    pub async fn generate_reply(&self, user_text: &str) -> String {
        self.reply_at(user_text, Local::now().naive_local()).await
    }

    /// Generate a reply as if the local clock read `now`.
    pub async fn reply_at(&self, user_text: &str, now: NaiveDateTime) -> String {
        if let Some(reply) = self.ask_llm(user_text).await {
            return reply;
        }
        self.rule_based_reply(user_text, now).await
    }

    /// `None` when there is no provider, the call fails, or the answer is blank.
    async fn ask_llm(&self, user_text: &str) -> Option<String> {
        let provider = self.llm.as_ref()?;

        let request = CompletionRequest {
            model: String::new(),
            messages: vec![Message {
                role: MessageRole::User,
                content: user_text.to_string(),
            }],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: MAX_REPLY_TOKENS,
            temperature: Some(TEMPERATURE),
        };

        match provider.complete(&request).await {
            Ok(response) => {
                let reply = response.content.trim();
                if reply.is_empty() {
                    debug!(provider = provider.name(), "Empty completion, using rules");
                    None
                } else {
                    Some(reply.to_string())
                }
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "LLM completion failed, using rules");
                None
            }
        }
    }

    /// The deterministic reply for `user_text`, without the language model.
    pub async fn rule_based_reply(&self, user_text: &str, now: NaiveDateTime) -> String {
        match rules::match_rule(user_text) {
            Rule::Empty => rules::EMPTY_REPLY.to_string(),
            Rule::Greeting => rules::GREETING_REPLY.to_string(),
            Rule::Time => format!("The current time is {}.", now.format(rules::TIME_FORMAT)),
            Rule::Date => format!("Today is {}.", now.format(rules::DATE_FORMAT)),
            Rule::Weather => rules::WEATHER_REPLY.to_string(),
            Rule::Lookup { topic } => self.lookup(&topic).await,
            Rule::Help => rules::HELP_REPLY.to_string(),
        }
    }

    async fn lookup(&self, topic: &str) -> String {
        match self.summarizer.summarize(topic, SUMMARY_SENTENCES).await {
            Ok(summary) => summary,
            Err(LookupError::Ambiguous { options }) => {
                // Only the first suggestion is retried, once.
                if let Some(first) = options.first() {
                    match self.summarizer.summarize(first, SUMMARY_SENTENCES).await {
                        Ok(summary) => return summary,
                        Err(e) => {
                            debug!(topic = %first, error = %e, "Retry with first option failed")
                        }
                    }
                }
                rules::ambiguous_reply(&options)
            }
            Err(LookupError::NotFound) => rules::NOT_FOUND_REPLY.to_string(),
            Err(e) => {
                warn!(topic, error = %e, "Summary lookup failed");
                rules::LOOKUP_FAILED_REPLY.to_string()
            }
        }
    }
}
