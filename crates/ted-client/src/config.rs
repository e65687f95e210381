use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// Host of the public Bot API.
pub const DEFAULT_API_HOST: &str = "api.telegram.org";

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TED_BOT_TOKEN";

/// Static configuration of a [`crate::Bot`]. Read-only once the bot is built.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot token issued by @BotFather.
    #[serde(default)]
    pub token: String,

    /// API host; requests go to `https://<api_host>/bot<token>/<method>`.
    #[serde(default = "default_api_host")]
    pub api_host: String,

    #[serde(default)]
    pub retry: RetryPolicy,

    /// Whole-request timeout for the default HTTP client. Unset means the
    /// client's own defaults apply.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

impl BotConfig {
    /// Configuration with default host and retry policy.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_host: default_api_host(),
            retry: RetryPolicy::default(),
            request_timeout_secs: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file if it exists (ignore if it doesn't)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Reads `TED_BOT_TOKEN` (required), `TED_API_HOST`, `TED_MAX_RETRIES`,
    /// `TED_RETRY_DELAY_MS` and `TED_REQUEST_TIMEOUT_SECS`. Unparseable numbers
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingToken)?;

        let mut config = Self::new(token);

        if let Some(host) = lookup("TED_API_HOST").filter(|h| !h.trim().is_empty()) {
            config.api_host = host;
        }

        if let Some(max_retries) = lookup("TED_MAX_RETRIES").and_then(|s| s.parse().ok()) {
            config.retry.max_retries = max_retries;
        }

        if let Some(delay_ms) = lookup("TED_RETRY_DELAY_MS").and_then(|s| s.parse().ok()) {
            config.retry.delay_ms = delay_ms;
        }

        config.request_timeout_secs = lookup("TED_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs| secs > 0);

        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing `token` falls back to `TED_BOT_TOKEN`.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_yaml_str(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid config: {e}")))?;

        if config.token.trim().is_empty() {
            config.token = lookup(TOKEN_ENV)
                .filter(|t| !t.trim().is_empty())
                .ok_or(Error::MissingToken)?;
        }

        Ok(config)
    }

    /// `None` when unset or zero; a zero timeout would fail every request.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }

    /// `https://<api_host>/bot<token>/<method>`
    pub fn endpoint(&self, method: &str) -> String {
        format!("https://{}/bot{}/{}", self.api_host, self.token, method)
    }

    /// The bot token, masked for logging.
    pub fn token_masked(&self) -> String {
        mask_token(&self.token)
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &self.token_masked())
            .field("api_host", &self.api_host)
            .field("retry", &self.retry)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Keep the first and last four characters of a token.
pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
