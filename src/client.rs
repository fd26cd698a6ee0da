//! HTTP client for the Web Dev Pack API.

use std::path::Path;

use reqwest::multipart;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{
    self, FileHandle, FileResult, HashResult, KeyPair, PasswordResult, TextResult, TextTransform,
};
use crate::error::{Result, WdpError};
use crate::fs;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.webdevpack.io";

/// Name of the authentication header.
const API_KEY_HEADER: &str = "WDP-API-Key";

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Client configuration.
///
/// Holds the optional API key sent as the `WDP-API-Key` header. Immutable
/// once the client is constructed.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    api_key: Option<String>,
}

impl ClientConfig {
    /// Configuration without an API key (anonymous quota).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with an API key.
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
        }
    }
}

/// Async client for the Web Dev Pack REST API.
///
/// Every public operation is one fixed sequence: local preflight checks
/// where files are involved, at most one upload, one API call, and at most
/// one download. Nothing is retried and nothing is cached; failures surface
/// immediately as [`WdpError`].
///
/// The client is cheap to clone and safe to share across tasks; it holds no
/// mutable state beyond reqwest's connection pool.
///
/// # Examples
///
/// ```no_run
/// use webdevpack::{ClientConfig, WdpClient};
///
/// # async fn example() -> webdevpack::Result<()> {
/// let client = WdpClient::new(ClientConfig::with_api_key("my-key"));
/// client.optimize_image("photo.png", "photo.min.png").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WdpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WdpClient {
    /// Create a client against the production endpoint.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom origin (self-hosted or test server).
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: normalize_url(base_url),
            api_key: config.api_key,
        }
    }

    // --- request dispatch ---------------------------------------------------

    fn apply_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    /// POST a JSON payload and unwrap the response envelope.
    async fn post_json<T: Serialize + ?Sized>(&self, pathname: &str, payload: &T) -> Result<Value> {
        let url = format!("{}{}", self.base_url, pathname);
        debug!(pathname, "POST json");
        let response = self
            .apply_key(self.http.post(&url).json(payload))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    /// POST a multipart body and unwrap the response envelope. The multipart
    /// encoder sets its own content type; nothing is overridden.
    async fn post_multipart(&self, pathname: &str, form: multipart::Form) -> Result<Value> {
        let url = format!("{}{}", self.base_url, pathname);
        debug!(pathname, "POST multipart");
        let response = self
            .apply_key(self.http.post(&url).multipart(form))
            .send()
            .await?;
        Self::unwrap_envelope(response).await
    }

    /// GET raw bytes; the envelope is bypassed for binary downloads.
    async fn get_bytes(&self, pathname: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, pathname);
        debug!(pathname, "GET bytes");
        let response = self.apply_key(self.http.get(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(WdpError::Transport {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Check the HTTP status, then parse the envelope out of the body text.
    async fn unwrap_envelope(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(WdpError::Transport {
                status: status.as_u16(),
                body: text,
            });
        }
        api::parse_envelope(&text)
    }

    // --- file transfer ------------------------------------------------------

    /// Upload a local file, returning the server-assigned handle.
    ///
    /// The whole file is buffered in memory before transfer; large-file
    /// behavior is bounded only by available memory.
    pub async fn upload(&self, source: impl AsRef<Path>) -> Result<FileHandle> {
        let source = source.as_ref();
        fs::check_source(source).await?;
        let data = tokio::fs::read(source).await?;
        let filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        debug!(path = %source.display(), bytes = data.len(), "uploading");
        let part = multipart::Part::bytes(data).file_name(filename);
        let form = multipart::Form::new().part("file", part);
        let result = self.post_multipart("/v0/files/upload", form).await?;
        let FileResult { file } = api::from_result(result)?;
        Ok(file)
    }

    /// Download a remote file handle to `target`, creating parent
    /// directories as needed and overwriting any existing file.
    ///
    /// A zero-length body is treated as a server-side failure
    /// ([`WdpError::EmptyDownload`]) and nothing is written.
    pub async fn download(&self, handle: &FileHandle, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        fs::check_target(target).await?;
        let data = self.get_bytes(&format!("/v0/files/{handle}")).await?;
        if data.is_empty() {
            return Err(WdpError::EmptyDownload);
        }
        fs::write_bytes(target, &data).await
    }

    // --- shared operation shapes ---------------------------------------------

    /// Upload `source`, run the processing endpoint on the handle, download
    /// the produced file to `target`. The remote handles are not cleaned up
    /// if a later step fails.
    async fn process_file(
        &self,
        pathname: &str,
        source: &Path,
        target: &Path,
        mut payload: serde_json::Map<String, Value>,
    ) -> Result<()> {
        fs::check_target(target).await?;
        let file = self.upload(source).await?;
        payload.insert("file".to_string(), json!(file));
        let result = self.post_json(pathname, &Value::Object(payload)).await?;
        let FileResult { file } = api::from_result(result)?;
        self.download(&file, target).await
    }

    /// Run a generation endpoint and download the produced file to `target`.
    async fn fetch_generated(&self, pathname: &str, payload: &Value, target: &Path) -> Result<()> {
        fs::check_target(target).await?;
        let result = self.post_json(pathname, payload).await?;
        let FileResult { file } = api::from_result(result)?;
        self.download(&file, target).await
    }

    /// Run a text-in, text-out endpoint.
    async fn text_op(&self, pathname: &str, text: &str) -> Result<String> {
        let result = self.post_json(pathname, &json!({ "text": text })).await?;
        Ok(api::from_result::<TextResult>(result)?.text)
    }

    // --- operations ----------------------------------------------------------

    /// Losslessly optimize an image and write the result to `target`.
    pub async fn optimize_image(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.process_file(
            "/v0/image/optimize",
            source.as_ref(),
            target.as_ref(),
            serde_json::Map::new(),
        )
        .await
    }

    /// Convert an image to `format` (e.g. `"png"`, `"webp"`) and write the
    /// result to `target`.
    pub async fn convert_image(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        format: &str,
    ) -> Result<()> {
        let mut payload = serde_json::Map::new();
        payload.insert("format".to_string(), json!(format));
        self.process_file("/v0/image/convert", source.as_ref(), target.as_ref(), payload)
            .await
    }

    /// Run OCR over an image and return the recognized text.
    pub async fn image_to_text(&self, source: impl AsRef<Path>) -> Result<String> {
        let file = self.upload(source.as_ref()).await?;
        let result = self
            .post_json("/v0/image/ocr", &json!({ "file": file }))
            .await?;
        Ok(api::from_result::<TextResult>(result)?.text)
    }

    /// Render `text` as a QR code in `format` (e.g. `"png"`, `"svg"`) and
    /// write it to `target`.
    pub async fn generate_qr_code(
        &self,
        text: &str,
        format: &str,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.fetch_generated(
            "/v0/codes/qr",
            &json!({ "text": text, "format": format }),
            target.as_ref(),
        )
        .await
    }

    /// Render `text` as a barcode of the given symbology (e.g. `"code128"`)
    /// and write it to `target`.
    pub async fn generate_barcode(
        &self,
        text: &str,
        symbology: &str,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.fetch_generated(
            "/v0/codes/barcode",
            &json!({ "text": text, "symbology": symbology }),
            target.as_ref(),
        )
        .await
    }

    /// Minify JavaScript source text.
    pub async fn minify_js(&self, source: &str) -> Result<String> {
        self.text_op("/v0/minify/js", source).await
    }

    /// Minify a JavaScript file into `target`.
    pub async fn minify_js_file(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.process_file(
            "/v0/minify/js",
            source.as_ref(),
            target.as_ref(),
            serde_json::Map::new(),
        )
        .await
    }

    /// Minify CSS source text.
    pub async fn minify_css(&self, source: &str) -> Result<String> {
        self.text_op("/v0/minify/css", source).await
    }

    /// Minify a CSS file into `target`.
    pub async fn minify_css_file(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.process_file(
            "/v0/minify/css",
            source.as_ref(),
            target.as_ref(),
            serde_json::Map::new(),
        )
        .await
    }

    /// Base64-encode a string.
    pub async fn base64_encode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/base64/encode", text).await
    }

    /// Decode a base64 string.
    pub async fn base64_decode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/base64/decode", text).await
    }

    /// Percent-encode a string for use in URLs.
    pub async fn url_encode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/url/encode", text).await
    }

    /// Decode a percent-encoded string.
    pub async fn url_decode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/url/decode", text).await
    }

    /// Escape a string as a JSON string literal.
    pub async fn json_encode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/json/encode", text).await
    }

    /// Parse a JSON string literal back into its value.
    pub async fn json_decode(&self, text: &str) -> Result<String> {
        self.text_op("/v0/text/json/decode", text).await
    }

    /// Apply a case/order transformation to `text`.
    pub async fn transform_text(&self, text: &str, mode: TextTransform) -> Result<String> {
        let result = self
            .post_json("/v0/text/transform", &json!({ "text": text, "mode": mode }))
            .await?;
        Ok(api::from_result::<TextResult>(result)?.text)
    }

    /// Hash `text` with the named algorithm (e.g. `"sha256"`), returning the
    /// hex digest.
    pub async fn hash_text(&self, text: &str, algorithm: &str) -> Result<String> {
        let result = self
            .post_json(
                "/v0/text/hash",
                &json!({ "text": text, "algorithm": algorithm }),
            )
            .await?;
        Ok(api::from_result::<HashResult>(result)?.hash)
    }

    /// WHOIS lookup for a domain. Registries disagree on the available
    /// fields, so the raw result object is returned as-is.
    pub async fn whois(&self, domain: &str) -> Result<Value> {
        self.post_json("/v0/domain/whois", &json!({ "domain": domain }))
            .await
    }

    /// Generate a random password of the given length.
    pub async fn generate_password(&self, length: u32) -> Result<String> {
        let result = self
            .post_json("/v0/generate/password", &json!({ "length": length }))
            .await?;
        Ok(api::from_result::<PasswordResult>(result)?.password)
    }

    /// Generate an asymmetric key pair of the given modulus size.
    pub async fn generate_key_pair(&self, bits: u32) -> Result<KeyPair> {
        let result = self
            .post_json("/v0/generate/keypair", &json!({ "bits": bits }))
            .await?;
        api::from_result(result)
    }

    /// Render an HTML string to PDF and write it to `target`.
    pub async fn html_to_pdf(&self, html: &str, target: impl AsRef<Path>) -> Result<()> {
        self.fetch_generated("/v0/pdf/html", &json!({ "html": html }), target.as_ref())
            .await
    }

    /// Render a local HTML file to PDF and write it to `target`.
    pub async fn html_file_to_pdf(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<()> {
        self.process_file(
            "/v0/pdf/html",
            source.as_ref(),
            target.as_ref(),
            serde_json::Map::new(),
        )
        .await
    }
}
