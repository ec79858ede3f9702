//! CLI parser and config loading.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use telegram_sender::{ChatId, MediaOptions, MediaSource, ParseMode, SenderConfig};

#[derive(Parser, Debug)]
#[command(name = "tgsend")]
#[command(about = "Send text, photos and files to a Telegram chat", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Bot token; overrides BOT_TOKEN.
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Destination chat id or @username; overrides TELEGRAM_CHAT_ID.
    #[arg(short, long, global = true, allow_hyphen_values = true)]
    pub chat: Option<String>,

    /// Bot API base URL; overrides TELEGRAM_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a text message ("-" reads stdin). Long text goes out as several messages.
    Text { text: String },
    /// Send a photo from a local path or a URL.
    Photo {
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        path: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        caption: Option<String>,
        /// plain, markdown, markdownv2 or html
        #[arg(long)]
        parse_mode: Option<ParseMode>,
    },
    /// Upload a local file as a document.
    File { path: PathBuf },
    /// Print the newest pending update as raw JSON.
    LastUpdate,
}

impl Cli {
    /// Per-call destination given on the command line, if any.
    pub fn destination(&self) -> Option<ChatId> {
        self.chat.as_deref().map(ChatId::from)
    }
}

/// Photo source and options from `photo` arguments.
pub fn photo_request(
    path: Option<PathBuf>,
    url: Option<String>,
    caption: Option<String>,
    parse_mode: Option<ParseMode>,
) -> Result<(MediaSource, MediaOptions)> {
    let source = match (path, url) {
        (Some(path), _) => MediaSource::LocalFile(path),
        (None, Some(url)) => MediaSource::RemoteUrl(url),
        (None, None) => anyhow::bail!("either --path or --url is required"),
    };
    let options = MediaOptions {
        caption,
        parse_mode,
    };
    Ok((source, options))
}

/// Load SenderConfig from environment, then apply CLI overrides and validate.
pub fn load_config(cli: &Cli) -> Result<SenderConfig> {
    let mut config = SenderConfig::load(cli.token.clone())?;
    if let Some(ref url) = cli.api_url {
        config.telegram_api_url = Some(url.clone());
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_with_global_chat() {
        let cli = Cli::try_parse_from(["tgsend", "--chat", "-100200", "text", "hello"]).unwrap();
        assert_eq!(cli.destination(), Some(ChatId::Id(-100200)));
        assert!(matches!(cli.command, Commands::Text { ref text } if text == "hello"));
    }

    #[test]
    fn parses_photo_url_with_parse_mode() {
        let cli = Cli::try_parse_from([
            "tgsend",
            "photo",
            "--url",
            "https://example.com/a.png",
            "--caption",
            "<b>a</b>",
            "--parse-mode",
            "html",
        ])
        .unwrap();
        match cli.command {
            Commands::Photo {
                path,
                url,
                caption,
                parse_mode,
            } => {
                let (source, options) = photo_request(path, url, caption, parse_mode).unwrap();
                assert_eq!(
                    source,
                    MediaSource::RemoteUrl("https://example.com/a.png".to_string())
                );
                assert_eq!(options.caption.as_deref(), Some("<b>a</b>"));
                assert_eq!(options.parse_mode, Some(ParseMode::Html));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn photo_rejects_path_and_url_together() {
        let result = Cli::try_parse_from([
            "tgsend",
            "photo",
            "--path",
            "a.png",
            "--url",
            "https://example.com/a.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn photo_requires_a_source() {
        assert!(Cli::try_parse_from(["tgsend", "photo"]).is_err());
    }

    #[test]
    fn parses_last_update() {
        let cli = Cli::try_parse_from(["tgsend", "last-update"]).unwrap();
        assert!(matches!(cli.command, Commands::LastUpdate));
        assert_eq!(cli.destination(), None);
    }
}
