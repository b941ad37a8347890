//! Process configuration for Voicemate.
//!
//! Everything comes from environment variables (after `.env` is loaded by the
//! binary) and every value has a default. [`AppConfig`] is built once at
//! startup and handed to the components that need it; nothing below this
//! point reads the environment.

use secrecy::SecretString;

pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_NAME: &str = "LearningProject";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WIKIPEDIA_LANG: &str = "en";

/// Where conversation records live.
#[derive(Debug, Clone)]
pub enum DatabaseSettings {
    MySql {
        host: String,
        port: u16,
        user: String,
        password: SecretString,
        database: String,
    },
    /// Selected by a `sqlite:` `DATABASE_URL`.
    Sqlite { url: String },
}

/// Remote language-model settings. Absent when no API key is configured.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
}

/// Encyclopedia endpoint.
#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub api_url: String,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub llm: Option<LlmSettings>,
    pub lookup: LookupSettings,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset. An unparsable `DB_PORT` falls back to the
    /// default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let database = match get("DATABASE_URL") {
            Some(url) if url.starts_with("sqlite:") => DatabaseSettings::Sqlite { url },
            Some(url) => {
                let scheme = url_scheme(&url);
                tracing::warn!(%scheme, "DATABASE_URL is not a sqlite URL, using DB_* settings");
                mysql_settings(&get, &get_or)
            }
            None => mysql_settings(&get, &get_or),
        };

        let llm = get("OPENAI_API_KEY").map(|key| LlmSettings {
            api_key: SecretString::from(key),
            model: get_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            base_url: get_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
        });

        let api_url = get("WIKIPEDIA_API_URL").unwrap_or_else(|| {
            let lang = get_or("WIKIPEDIA_LANG", DEFAULT_WIKIPEDIA_LANG);
            wikipedia_api_url(&lang)
        });

        Self {
            database,
            llm,
            lookup: LookupSettings { api_url },
        }
    }
}

fn mysql_settings(
    get: &impl Fn(&str) -> Option<String>,
    get_or: &impl Fn(&str, &str) -> String,
) -> DatabaseSettings {
    let port = match get("DB_PORT") {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Invalid DB_PORT, using {DEFAULT_DB_PORT}");
            DEFAULT_DB_PORT
        }),
        None => DEFAULT_DB_PORT,
    };

    DatabaseSettings::MySql {
        host: get_or("DB_HOST", DEFAULT_DB_HOST),
        port,
        user: get_or("DB_USER", DEFAULT_DB_USER),
        // An empty password is a legitimate value here.
        password: SecretString::from(get("DB_PASSWORD").unwrap_or_default()),
        database: get_or("DB_NAME", DEFAULT_DB_NAME),
    }
}

/// The scheme of a connection URL, the only part of it safe to log.
fn url_scheme(url: &str) -> &str {
    url.split_once(':').map_or("unknown", |(scheme, _)| scheme)
}

/// MediaWiki action API endpoint for a language edition.
pub fn wikipedia_api_url(lang: &str) -> String {
    format!("https://{lang}.wikipedia.org/w/api.php")
}
