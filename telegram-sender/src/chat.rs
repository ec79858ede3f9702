//! Chat destination type and resolution.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SendError};

/// Chat a message is delivered into: numeric id or public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| ChatId::Username(s.to_string()))
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        ChatId::from(s.as_str())
    }
}

impl FromStr for ChatId {
    type Err = std::convert::Infallible;

    /// Numeric strings (including negative group ids) become [`ChatId::Id`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Username(s.to_string()),
        })
    }
}

impl ChatId {
    /// An empty username names no chat.
    pub fn is_blank(&self) -> bool {
        matches!(self, ChatId::Username(name) if name.trim().is_empty())
    }
}

/// Picks the destination for one call: the explicit one wins over the client default.
/// Blank destinations count as absent.
pub fn resolve_destination(explicit: Option<&ChatId>, default: Option<&ChatId>) -> Result<ChatId> {
    explicit
        .filter(|chat| !chat.is_blank())
        .or(default.filter(|chat| !chat.is_blank()))
        .cloned()
        .ok_or(SendError::MissingDestination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_username() {
        assert_eq!(ChatId::from("-1001234567890"), ChatId::Id(-1001234567890));
        assert_eq!(ChatId::from("42"), ChatId::Id(42));
        assert_eq!(
            ChatId::from("@my_channel"),
            ChatId::Username("@my_channel".to_string())
        );
        assert_eq!(ChatId::from("7".to_string()), ChatId::Id(7));
    }

    #[test]
    fn display_is_wire_form() {
        assert_eq!(ChatId::Id(-100).to_string(), "-100");
        assert_eq!(ChatId::Username("@chan".into()).to_string(), "@chan");
    }

    #[test]
    fn explicit_overrides_default() {
        let explicit = ChatId::Id(1);
        let default = ChatId::Id(2);
        let chosen = resolve_destination(Some(&explicit), Some(&default)).unwrap();
        assert_eq!(chosen, explicit);
    }

    #[test]
    fn falls_back_to_default() {
        let default = ChatId::Id(2);
        assert_eq!(resolve_destination(None, Some(&default)).unwrap(), default);
    }

    #[test]
    fn blank_explicit_falls_back_to_default() {
        let blank = ChatId::from("  ");
        assert!(blank.is_blank());
        let default = ChatId::Id(2);
        assert_eq!(resolve_destination(Some(&blank), Some(&default)).unwrap(), default);
    }

    #[test]
    fn blank_everywhere_fails() {
        let blank = ChatId::from("");
        assert!(matches!(
            resolve_destination(Some(&blank), Some(&blank)),
            Err(SendError::MissingDestination)
        ));
    }

    #[test]
    fn missing_both_fails() {
        assert!(matches!(
            resolve_destination(None, None),
            Err(SendError::MissingDestination)
        ));
    }
}
