//! Error types for the Web Dev Pack client.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`WdpClient`](crate::WdpClient) operations.
#[derive(Error, Debug)]
pub enum WdpError {
    /// The server answered with a non-2xx HTTP status.
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    /// The response body was not JSON, or not a recognized envelope.
    #[error("unrecognized server response: {0}")]
    UnknownServer(String),

    /// The server rejected the call because a required argument was absent.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// The server rejected the value of an argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server reported a failure with a human-readable message.
    #[error("server error: {0}")]
    Server(String),

    /// A download returned a zero-length body.
    #[error("download returned an empty file")]
    EmptyDownload,

    /// The source path for an upload does not exist.
    #[error("source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The target path (or its nearest existing ancestor) is not writable.
    #[error("target not writable: {}", path.display())]
    TargetNotWritable { path: PathBuf },

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request failed before an HTTP status was available
    /// (connection refused, DNS failure, interrupted body, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias for Web Dev Pack operations.
pub type Result<T> = std::result::Result<T, WdpError>;

impl WdpError {
    /// Translate a server error envelope into a typed error.
    ///
    /// `code` is a `kind:argument` pair split on the first colon, so the
    /// argument itself may contain colons. Unrecognized kinds fall back to
    /// the server-supplied `message`, and failing that to the raw body.
    pub(crate) fn from_error_envelope(
        code: Option<String>,
        message: Option<String>,
        raw: &str,
    ) -> Self {
        if let Some(code) = code {
            let (kind, argument) = match code.split_once(':') {
                Some((kind, argument)) => (kind, argument),
                None => (code.as_str(), ""),
            };
            match kind {
                "missingArgument" => return WdpError::MissingArgument(argument.to_string()),
                "invalidArgument" => return WdpError::InvalidArgument(argument.to_string()),
                _ => {}
            }
        }
        match message {
            Some(message) => WdpError::Server(message),
            None => WdpError::UnknownServer(raw.to_string()),
        }
    }
}
