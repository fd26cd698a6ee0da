//! Wire models for the Web Dev Pack REST API.
//!
//! Every non-GET endpoint answers with the same envelope:
//! `{"status":"ok","result":{...}}` on success or
//! `{"status":"error","code":"kind:argument","message":"..."}` on failure.
//! Binary downloads bypass the envelope entirely.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WdpError};

/// Response envelope returned by every non-GET endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status")]
pub(crate) enum Envelope {
    #[serde(rename = "ok")]
    Ok { result: Value },
    #[serde(rename = "error")]
    Error {
        code: Option<String>,
        message: Option<String>,
    },
}

/// Parse the raw body of a non-GET response into its `result` payload.
///
/// Anything that is not a well-formed envelope (non-JSON body, unrecognized
/// `status`, missing `result`) is reported as [`WdpError::UnknownServer`]
/// carrying the raw body text.
pub(crate) fn parse_envelope(raw: &str) -> Result<Value> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|_| WdpError::UnknownServer(raw.to_string()))?;
    match envelope {
        Envelope::Ok { result } => Ok(result),
        Envelope::Error { code, message } => {
            Err(WdpError::from_error_envelope(code, message, raw))
        }
    }
}

/// Deserialize an operation-specific view of a `result` payload.
pub(crate) fn from_result<T: DeserializeOwned>(result: Value) -> Result<T> {
    let raw = result.to_string();
    serde_json::from_value(result).map_err(|_| WdpError::UnknownServer(raw))
}

/// Opaque server-assigned identifier for an uploaded or generated file.
///
/// Returned by [`WdpClient::upload`](crate::WdpClient::upload), consumed by
/// the processing operations and by
/// [`WdpClient::download`](crate::WdpClient::download).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    /// Wrap a handle string previously returned by the server.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `result` view for operations that yield a remote file.
#[derive(Debug, Deserialize)]
pub(crate) struct FileResult {
    pub file: FileHandle,
}

/// `result` view for operations that yield transformed text.
#[derive(Debug, Deserialize)]
pub(crate) struct TextResult {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HashResult {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordResult {
    pub password: String,
}

/// Generated asymmetric key pair, PEM-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

/// Text transformation applied by the `/v0/text/transform` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    Upper,
    Lower,
    Capitalize,
    Reverse,
}
