//! Sender config: token, optional default chat, API URL, transport timeout and log file.
//! Loaded from env: BOT_TOKEN, TELEGRAM_CHAT_ID, TELEGRAM_API_URL (or TELOXIDE_API_URL),
//! TELEGRAM_TIMEOUT_SECS, LOG_FILE.

use anyhow::Result;
use std::env;

use crate::chat::ChatId;
use crate::token::BotToken;

/// Default request timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// BOT_TOKEN
    pub bot_token: BotToken,
    /// TELEGRAM_CHAT_ID; used when a call names no destination
    pub default_chat: Option<ChatId>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// TELEGRAM_TIMEOUT_SECS
    pub timeout_secs: u64,
    /// LOG_FILE
    pub log_file: Option<String>,
}

impl SenderConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let default_chat = env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(ChatId::from);
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let timeout_secs = env::var("TELEGRAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            bot_token: BotToken::new(bot_token),
            default_chat,
            telegram_api_url,
            timeout_secs,
            log_file,
        })
    }

    /// Builds config with the given token; everything else at defaults.
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: BotToken::new(bot_token),
            default_chat: None,
            telegram_api_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }

    /// Validate config (telegram_api_url must be a valid URL if set; token must be non-empty).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.expose().trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("TELEGRAM_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}
