//! Engine configuration from environment variables.

use std::time::Duration;

use crate::stores::DEFAULT_SESSION_IDLE_TTL;

use crate::infrastructure::openrouter::{
    ApiKey, OpenRouterConfig, API_KEY_ENV, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL,
    DEFAULT_SITE_URL, DEFAULT_TIMEOUT_SECS,
};

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Everything the binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// `*` or a comma-separated origin list. `None` disables CORS.
    pub cors_allowed_origins: Option<String>,
    pub openrouter: OpenRouterConfig,
    /// Sessions untouched this long are evicted.
    pub session_idle_ttl: Duration,
}

impl EngineConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    ///
    /// The API key is not captured here: the client reads `OPENROUTER_API_KEY`
    /// on every request so a key added after startup is picked up.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = var("SERVER_PORT")
            .or_else(|| var("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT);

        let timeout_secs = var("LLM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let session_idle_ttl = var("SESSION_IDLE_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SESSION_IDLE_TTL);

        Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            openrouter: OpenRouterConfig {
                base_url: var("OPENROUTER_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
                model: var("OPENROUTER_MODEL")
                    .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
                api_key: ApiKey::FromEnv(API_KEY_ENV.to_string()),
                site_url: var("SITE_URL")
                    .or_else(|| var("NEXT_PUBLIC_SITE_URL"))
                    .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            session_idle_ttl,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
