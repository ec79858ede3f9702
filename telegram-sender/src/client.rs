//! Messaging client: text, photo and document delivery to one Telegram chat, plus a read of
//! the newest pending update.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::chat::{resolve_destination, ChatId};
use crate::config::SenderConfig;
use crate::encoding::{percent_encode, split_text, MAX_TEXT_LEN};
use crate::error::{Result, SendError, TransportError};
use crate::media::{MediaOptions, MediaSource};
use crate::token::BotToken;
use crate::transport::{HttpTransport, MultipartForm, Transport};

/// Public Telegram Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram Bot API client bound to one token.
///
/// Holds no per-call state. The only mutable field is the default destination, replaced
/// atomically behind a lock; clones share it along with the transport.
pub struct BotClient<T: Transport = HttpTransport> {
    token: BotToken,
    api_url: String,
    default_destination: Arc<RwLock<Option<ChatId>>>,
    transport: Arc<T>,
}

impl BotClient<HttpTransport> {
    /// Client using a default reqwest transport (no timeout).
    pub fn new(token: impl Into<BotToken>) -> Self {
        Self::with_transport(token, HttpTransport::new())
    }

    /// Client built from config: timeout, API URL and default chat applied.
    pub fn from_config(config: &SenderConfig) -> std::result::Result<Self, TransportError> {
        let transport = HttpTransport::with_timeout(Duration::from_secs(config.timeout_secs))?;
        let mut client = Self::with_transport(config.bot_token.clone(), transport);
        if let Some(ref url) = config.telegram_api_url {
            client = client.with_api_url(url.clone());
        }
        if let Some(ref chat) = config.default_chat {
            client = client.with_default_destination(chat.clone());
        }
        Ok(client)
    }
}

impl<T: Transport> BotClient<T> {
    pub fn with_transport(token: impl Into<BotToken>, transport: T) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            default_destination: Arc::new(RwLock::new(None)),
            transport: Arc::new(transport),
        }
    }

    /// Overrides the API base (e.g. a local Bot API server). A trailing `/` is ignored.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_destination(self, chat: impl Into<ChatId>) -> Self {
        Self {
            default_destination: Arc::new(RwLock::new(Some(chat.into()))),
            ..self
        }
    }

    pub async fn set_default_destination(&self, chat: impl Into<ChatId>) {
        *self.default_destination.write().await = Some(chat.into());
    }

    pub async fn clear_default_destination(&self) {
        *self.default_destination.write().await = None;
    }

    pub async fn default_destination(&self) -> Option<ChatId> {
        self.default_destination.read().await.clone()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token.expose(), method)
    }

    async fn resolve(&self, destination: Option<&ChatId>) -> Result<ChatId> {
        let default = self.default_destination.read().await;
        resolve_destination(destination, default.as_ref()).map_err(|e| {
            warn!("Chat destination is not specified");
            e
        })
    }

    /// Sends `text`, split into chunks of at most [`MAX_TEXT_LEN`] characters, one
    /// `sendMessage` call per chunk in order.
    ///
    /// Stops at the first failed chunk. Chunks before it have already been delivered and are
    /// not recalled; the error's `payload` names the failed chunk (`text chunk 2/3 ...`).
    /// Empty text sends nothing.
    pub async fn send_text(&self, text: &str, destination: Option<&ChatId>) -> Result<()> {
        let chat_id = self.resolve(destination).await?;
        let chunks = split_text(text, MAX_TEXT_LEN);
        let total = chunks.len();
        debug!(
            chat_id = %chat_id,
            text_len = text.chars().count(),
            chunks = total,
            "step: sendMessage"
        );

        let chat_param = percent_encode(&chat_id.to_string());
        let base = self.method_url("sendMessage");
        for (index, chunk) in chunks.iter().enumerate() {
            let url = format!(
                "{}?chat_id={}&text={}",
                base,
                chat_param,
                percent_encode(chunk)
            );
            if let Err(source) = self.transport.get(&url).await {
                warn!(
                    chat_id = %chat_id,
                    chunk = index + 1,
                    total,
                    delivered = index,
                    error = %source,
                    "sendMessage failed, remaining chunks dropped"
                );
                let payload = format!(
                    "text chunk {}/{} ({} chars)",
                    index + 1,
                    total,
                    chunk.chars().count()
                );
                return Err(SendError::transport(payload, source));
            }
        }
        Ok(())
    }

    /// Sends a photo with optional caption and parse mode in one `sendPhoto` call.
    ///
    /// A local file goes up as a binary attachment; a remote URL is passed as a plain field
    /// for Telegram to fetch.
    pub async fn send_media(
        &self,
        source: MediaSource,
        options: &MediaOptions,
        destination: Option<&ChatId>,
    ) -> Result<()> {
        let chat_id = self.resolve(destination).await?;
        let payload = source.describe();

        let form = MultipartForm::new().text("chat_id", chat_id.to_string());
        let mut form = match source {
            MediaSource::LocalFile(path) => form.file("photo", path),
            MediaSource::RemoteUrl(url) => form.text("photo", url),
        };
        if let Some(ref caption) = options.caption {
            form = form.text("caption", caption.as_str());
        }
        if let Some(mode) = options.parse_mode.and_then(|m| m.as_api_str()) {
            form = form.text("parse_mode", mode);
        }

        self.post_form("sendPhoto", form, payload, &chat_id).await
    }

    pub async fn send_photo_file(
        &self,
        path: impl Into<PathBuf>,
        options: &MediaOptions,
        destination: Option<&ChatId>,
    ) -> Result<()> {
        self.send_media(MediaSource::LocalFile(path.into()), options, destination)
            .await
    }

    pub async fn send_photo_url(
        &self,
        url: impl Into<String>,
        options: &MediaOptions,
        destination: Option<&ChatId>,
    ) -> Result<()> {
        self.send_media(MediaSource::RemoteUrl(url.into()), options, destination)
            .await
    }

    /// Uploads a local file as a document (`sendDocument`). No caption.
    pub async fn send_file(&self, path: impl AsRef<Path>, destination: Option<&ChatId>) -> Result<()> {
        let path = path.as_ref();
        let chat_id = self.resolve(destination).await?;
        let form = MultipartForm::new()
            .text("chat_id", chat_id.to_string())
            .file("document", path);
        let payload = format!("document {}", path.display());
        self.post_form("sendDocument", form, payload, &chat_id).await
    }

    async fn post_form(
        &self,
        method: &str,
        form: MultipartForm,
        payload: String,
        chat_id: &ChatId,
    ) -> Result<()> {
        debug!(chat_id = %chat_id, payload = %payload, "step: {}", method);
        match self
            .transport
            .post_multipart(&self.method_url(method), form)
            .await
        {
            Ok(_) => Ok(()),
            Err(source) => {
                warn!(
                    chat_id = %chat_id,
                    payload = %payload,
                    error = %source,
                    "{} failed",
                    method
                );
                Err(SendError::transport(payload, source))
            }
        }
    }

    /// Fetches the newest pending update (`getUpdates?last=1&offset=-1`) as raw JSON.
    ///
    /// `offset=-1` also tells Telegram to treat every older update as read. Never fails: on a
    /// transport error the body captured so far is returned, which may be empty.
    pub async fn get_last_update(&self) -> String {
        let url = format!("{}?last=1&offset=-1", self.method_url("getUpdates"));
        debug!("step: getUpdates");
        match self.transport.get(&url).await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "getUpdates failed");
                err.body().map(str::to_owned).unwrap_or_default()
            }
        }
    }
}

impl<T: Transport> Clone for BotClient<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            api_url: self.api_url.clone(),
            default_destination: Arc::clone(&self.default_destination),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> fmt::Debug for BotClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClient")
            .field("token", &self.token)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
