//! HTTP transport seam: the client only builds URLs and form descriptions; a [`Transport`]
//! performs the call. [`HttpTransport`] is the reqwest-backed implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::error::TransportError;

/// One value of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text(String),
    /// Local file, sent as a binary attachment named after the file.
    File(PathBuf),
}

/// Ordered multipart form description, built by the client and sent by a [`Transport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, FormField)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormField::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.fields.push((name.into(), FormField::File(path.into())));
        self
    }

    pub fn fields(&self) -> &[(String, FormField)] {
        &self.fields
    }

    /// First field with the given name.
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn has_file(&self) -> bool {
        self.fields
            .iter()
            .any(|(_, value)| matches!(value, FormField::File(_)))
    }

    pub fn into_fields(self) -> Vec<(String, FormField)> {
        self.fields
    }
}

/// HTTP collaborator used by [`crate::BotClient`].
///
/// Implementations return the raw response body on success. Network failures, non-success
/// statuses and unreadable upload files are all reported as [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a fully formed URL.
    async fn get(&self, url: &str) -> Result<String, TransportError>;

    /// POST a multipart form.
    async fn post_multipart(&self, url: &str, form: MultipartForm)
        -> Result<String, TransportError>;
}

/// reqwest-backed [`Transport`]. Timeouts are configured here, not in the client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client whose every request is bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn file_part(path: &Path) -> Result<Part, TransportError> {
        let to_err = |source: std::io::Error| TransportError::File {
            path: path.to_path_buf(),
            source,
        };
        let file = tokio::fs::File::open(path).await.map_err(to_err)?;
        let len = file.metadata().await.map_err(to_err)?.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let body = Body::wrap_stream(ReaderStream::new(file));
        Ok(Part::stream_with_length(body, len).file_name(file_name))
    }
}

/// Reads the body; a non-success status becomes [`TransportError::Status`] with that body.
async fn read_body(response: Response) -> Result<String, TransportError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(TransportError::Status { status, body });
    }
    Ok(body)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?;
        read_body(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
    ) -> Result<String, TransportError> {
        let mut multipart = Form::new();
        for (name, field) in form.into_fields() {
            multipart = match field {
                FormField::Text(value) => multipart.text(name, value),
                FormField::File(path) => {
                    let part = Self::file_part(&path).await?;
                    debug!(field = %name, path = %path.display(), "attaching file");
                    multipart.part(name, part)
                }
            };
        }
        let response = self.client.post(url).multipart(multipart).send().await?;
        read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_keeps_field_order_and_kinds() {
        let form = MultipartForm::new()
            .text("chat_id", "42")
            .file("photo", "/tmp/cat.jpg")
            .text("caption", "cat");

        let names: Vec<&str> = form.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["chat_id", "photo", "caption"]);
        assert!(form.has_file());
        assert_eq!(
            form.get("photo"),
            Some(&FormField::File(PathBuf::from("/tmp/cat.jpg")))
        );
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn text_only_form_has_no_file() {
        let form = MultipartForm::new().text("chat_id", "42").text("photo", "https://x/y.png");
        assert!(!form.has_file());
    }
}
