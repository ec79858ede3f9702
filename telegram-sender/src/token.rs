//! Bot credential. Kept opaque: no `Display`, masked `Debug`.

use std::fmt;

/// Masks a bot token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the token.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        let head = &token[..7];
        let tail = &token[len - 4..];
        format!("{}***{}", head, tail)
    }
}

/// Telegram bot token (`123456789:AA...`). Never validated or refreshed here; an invalid
/// token only shows up as an API error from the server.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building request URLs only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_token(&self.0)
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotToken").field(&self.masked()).finish()
    }
}

impl From<String> for BotToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for BotToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
