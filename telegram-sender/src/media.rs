//! Outbound media reference: where the photo comes from and how its caption renders.

use std::path::PathBuf;
use std::str::FromStr;

/// Photo payload. Exactly one variant is sent per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Uploaded from disk as a multipart file part.
    LocalFile(PathBuf),
    /// Passed through as a plain string field; Telegram downloads it.
    RemoteUrl(String),
}

impl MediaSource {
    /// Short description used in logs and [`crate::SendError::TransportFailure`].
    pub fn describe(&self) -> String {
        match self {
            MediaSource::LocalFile(path) => format!("photo file {}", path.display()),
            MediaSource::RemoteUrl(url) => format!("photo url {}", url),
        }
    }
}

/// Caption markup mode (`parse_mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// No `parse_mode` field is sent.
    #[default]
    Plain,
    /// Legacy Markdown.
    Markdown,
    MarkdownV2,
    Html,
}

impl ParseMode {
    /// Wire value, or `None` for [`ParseMode::Plain`].
    pub fn as_api_str(self) -> Option<&'static str> {
        match self {
            ParseMode::Plain => None,
            ParseMode::Markdown => Some("Markdown"),
            ParseMode::MarkdownV2 => Some("MarkdownV2"),
            ParseMode::Html => Some("HTML"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "none" => Ok(ParseMode::Plain),
            "markdown" => Ok(ParseMode::Markdown),
            "markdownv2" => Ok(ParseMode::MarkdownV2),
            "html" => Ok(ParseMode::Html),
            other => Err(format!(
                "unknown parse mode '{}' (expected plain, markdown, markdownv2 or html)",
                other
            )),
        }
    }
}

/// Optional caption and markup mode for a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaOptions {
    pub caption: Option<String>,
    pub parse_mode: Option<ParseMode>,
}

impl MediaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_wire_values() {
        assert_eq!(ParseMode::Plain.as_api_str(), None);
        assert_eq!(ParseMode::Markdown.as_api_str(), Some("Markdown"));
        assert_eq!(ParseMode::MarkdownV2.as_api_str(), Some("MarkdownV2"));
        assert_eq!(ParseMode::Html.as_api_str(), Some("HTML"));
    }

    #[test]
    fn parse_mode_from_str_is_case_insensitive() {
        assert_eq!("HTML".parse::<ParseMode>().unwrap(), ParseMode::Html);
        assert_eq!("MarkdownV2".parse::<ParseMode>().unwrap(), ParseMode::MarkdownV2);
        assert_eq!("markdown".parse::<ParseMode>().unwrap(), ParseMode::Markdown);
        assert_eq!("plain".parse::<ParseMode>().unwrap(), ParseMode::Plain);
        assert!("bbcode".parse::<ParseMode>().is_err());
    }

    #[test]
    fn options_builder() {
        let opts = MediaOptions::new()
            .with_caption("hi")
            .with_parse_mode(ParseMode::Html);
        assert_eq!(opts.caption.as_deref(), Some("hi"));
        assert_eq!(opts.parse_mode, Some(ParseMode::Html));
    }

    #[test]
    fn describe_names_source() {
        let file = MediaSource::LocalFile(PathBuf::from("/tmp/cat.jpg"));
        let url = MediaSource::RemoteUrl("https://example.com/cat.jpg".to_string());
        assert_eq!(file.describe(), "photo file /tmp/cat.jpg");
        assert_eq!(url.describe(), "photo url https://example.com/cat.jpg");
    }
}
