//! # Telegram sender
//!
//! Client for the Telegram Bot HTTP API scoped to one chat: chunked text messages, photos from
//! disk or URL, document uploads, and a read of the newest pending update.
//!
//! ```rust,no_run
//! use telegram_sender::{BotClient, MediaOptions, ParseMode};
//!
//! async fn example() -> Result<(), telegram_sender::SendError> {
//!     let client = BotClient::new("123456:ABC").with_default_destination(-1001234567890i64);
//!     client.send_text("deploy finished", None).await?;
//!     let opts = MediaOptions::new().with_caption("<b>graph</b>").with_parse_mode(ParseMode::Html);
//!     client.send_photo_file("/tmp/graph.png", &opts, None).await?;
//!     println!("{}", client.get_last_update().await);
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod client;
pub mod config;
pub mod encoding;
pub mod error;
pub mod logger;
pub mod media;
pub mod token;
pub mod transport;

pub use chat::{resolve_destination, ChatId};
pub use client::{BotClient, DEFAULT_API_URL};
pub use config::SenderConfig;
pub use encoding::{percent_encode, split_text, MAX_TEXT_LEN};
pub use error::{Result, SendError, TransportError};
pub use logger::init_tracing;
pub use media::{MediaOptions, MediaSource, ParseMode};
pub use token::{mask_token, BotToken};
pub use transport::{FormField, HttpTransport, MultipartForm, Transport};
