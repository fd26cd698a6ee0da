//! Async Rust client for the Web Dev Pack HTTP API.
//!
//! Web Dev Pack bundles a set of web-development utilities behind one REST
//! endpoint: image optimization and conversion, OCR, QR/barcode generation,
//! JS/CSS minification, text encoding/transformation/hashing, domain WHOIS,
//! password and key-pair generation, and HTML-to-PDF rendering. All
//! processing happens server-side; this crate marshals requests, moves
//! files, and translates the server's error envelope into [`WdpError`].
//!
//! File-consuming operations validate local paths before any network call,
//! upload the file as multipart form data to obtain an opaque
//! [`FileHandle`], run the processing endpoint, and (where the result is a
//! file) download it, creating parent directories as needed.
//!
//! # Example
//!
//! ```no_run
//! use webdevpack::{ClientConfig, WdpClient};
//!
//! # async fn example() -> webdevpack::Result<()> {
//! let client = WdpClient::new(ClientConfig::with_api_key("my-key"));
//!
//! client.optimize_image("hero.png", "hero.min.png").await?;
//! let password = client.generate_password(24).await?;
//! let text = client.image_to_text("scan.jpg").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod error;

mod fs;

pub use api::{FileHandle, KeyPair, TextTransform};
pub use client::{ClientConfig, WdpClient, DEFAULT_BASE_URL};
pub use error::{Result, WdpError};
