//! Happy-path coverage for the operation facade, run against the in-process
//! mock server.

mod support;

use anyhow::Result;
use webdevpack::{ClientConfig, FileHandle, TextTransform, WdpClient};

async fn setup() -> Result<(support::MockServer, WdpClient)> {
    let (server, url) = support::MockServer::new().start().await?;
    let client = WdpClient::with_base_url(ClientConfig::with_api_key("test-key"), &url);
    Ok((server, client))
}

#[tokio::test]
async fn upload_and_download_round_trip() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("payload.bin");
    std::fs::write(&source, b"hello bytes")?;

    let handle = client.upload(&source).await?;
    let target = dir.path().join("copy.bin");
    client.download(&handle, &target).await?;

    assert_eq!(std::fs::read(&target)?, b"hello bytes");
    Ok(())
}

#[tokio::test]
async fn download_creates_missing_parent_dirs() -> Result<()> {
    let (server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let handle = FileHandle::new(server.state().store(b"nested".to_vec()));
    let target = dir.path().join("a/b/c/out.bin");
    client.download(&handle, &target).await?;

    assert_eq!(std::fs::read(&target)?, b"nested");
    Ok(())
}

#[tokio::test]
async fn download_overwrites_existing_target() -> Result<()> {
    let (server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let target = dir.path().join("out.bin");
    std::fs::write(&target, b"old contents that are longer")?;

    let handle = FileHandle::new(server.state().store(b"new".to_vec()));
    client.download(&handle, &target).await?;

    assert_eq!(std::fs::read(&target)?, b"new");
    Ok(())
}

#[tokio::test]
async fn upload_carries_the_original_filename() -> Result<()> {
    let (server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("photo.png");
    std::fs::write(&source, b"fake png")?;
    client.upload(&source).await?;

    let uploads = server.state().uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "photo.png");
    assert_eq!(uploads[0].1, b"fake png");
    Ok(())
}

#[tokio::test]
async fn api_key_header_is_attached_when_configured() -> Result<()> {
    let (server, client) = setup().await?;
    client.generate_password(8).await?;
    assert_eq!(server.state().last_api_key().as_deref(), Some("test-key"));
    Ok(())
}

#[tokio::test]
async fn api_key_header_is_omitted_when_unset() -> Result<()> {
    let (server, url) = support::MockServer::new().start().await?;
    let client = WdpClient::with_base_url(ClientConfig::new(), &url);
    client.generate_password(8).await?;
    assert_eq!(server.state().last_api_key(), None);
    Ok(())
}

#[tokio::test]
async fn optimize_image_writes_a_smaller_target() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("hero.png");
    std::fs::write(&source, vec![0xAB; 64])?;
    let target = dir.path().join("hero.min.png");

    client.optimize_image(&source, &target).await?;

    let written = std::fs::read(&target)?;
    assert!(!written.is_empty());
    assert!(written.len() < 64);
    Ok(())
}

#[tokio::test]
async fn convert_image_accepts_known_formats() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("hero.png");
    std::fs::write(&source, b"pixels")?;
    let target = dir.path().join("hero.webp");

    client.convert_image(&source, &target, "webp").await?;
    assert_eq!(std::fs::read(&target)?, b"pixels");
    Ok(())
}

#[tokio::test]
async fn image_to_text_returns_recognized_text() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("scan.jpg");
    std::fs::write(&source, b"scanned page")?;

    let text = client.image_to_text(&source).await?;
    assert_eq!(text, "The quick brown fox jumps over the lazy dog");
    Ok(())
}

#[tokio::test]
async fn generate_qr_code_writes_a_png() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let target = dir.path().join("qr.png");
    client
        .generate_qr_code("https://example.com", "png", &target)
        .await?;

    let written = std::fs::read(&target)?;
    assert!(written.starts_with(b"\x89PNG"));
    Ok(())
}

#[tokio::test]
async fn generate_barcode_writes_a_file() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let target = dir.path().join("barcode.png");
    client.generate_barcode("4006381333931", "ean13", &target).await?;
    assert!(std::fs::read(&target)?.starts_with(b"\x89PNG"));
    Ok(())
}

#[tokio::test]
async fn minify_js_collapses_whitespace() -> Result<()> {
    let (_server, client) = setup().await?;
    let minified = client.minify_js("let  a = 1;\nlet b  = 2;").await?;
    assert_eq!(minified, "let a = 1; let b = 2;");
    Ok(())
}

#[tokio::test]
async fn minify_css_file_end_to_end() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("style.css");
    std::fs::write(&source, "body {\n    color: red;\n}\n")?;
    let target = dir.path().join("style.min.css");

    client.minify_css_file(&source, &target).await?;
    assert_eq!(std::fs::read_to_string(&target)?, "body { color: red; }");
    Ok(())
}

#[tokio::test]
async fn encode_decode_round_trips() -> Result<()> {
    let (_server, client) = setup().await?;

    let samples = [
        "hello world",
        "with:colons:inside",
        "spaces & symbols / ? #",
        "ünïcödé ✓",
        "",
    ];

    for input in samples {
        let encoded = client.base64_encode(input).await?;
        assert_eq!(client.base64_decode(&encoded).await?, input, "base64: {input:?}");

        let encoded = client.url_encode(input).await?;
        assert_eq!(client.url_decode(&encoded).await?, input, "url: {input:?}");

        let encoded = client.json_encode(input).await?;
        assert_eq!(client.json_decode(&encoded).await?, input, "json: {input:?}");
    }
    Ok(())
}

#[tokio::test]
async fn transform_text_applies_the_mode() -> Result<()> {
    let (_server, client) = setup().await?;
    assert_eq!(
        client.transform_text("hello", TextTransform::Upper).await?,
        "HELLO"
    );
    assert_eq!(
        client.transform_text("abc", TextTransform::Reverse).await?,
        "cba"
    );
    assert_eq!(
        client
            .transform_text("hello world", TextTransform::Capitalize)
            .await?,
        "Hello world"
    );
    Ok(())
}

#[tokio::test]
async fn hash_text_returns_the_sha256_hex_digest() -> Result<()> {
    let (_server, client) = setup().await?;
    let digest = client.hash_text("abc", "sha256").await?;
    assert_eq!(
        digest,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    Ok(())
}

#[tokio::test]
async fn whois_returns_the_raw_result_object() -> Result<()> {
    let (_server, client) = setup().await?;
    let record = client.whois("example.com").await?;
    assert_eq!(record["domain"], "example.com");
    assert_eq!(record["registrar"], "Mock Registrar, Inc.");
    assert!(record["nameServers"].is_array());
    Ok(())
}

#[tokio::test]
async fn generate_password_has_the_requested_length() -> Result<()> {
    let (_server, client) = setup().await?;
    let password = client.generate_password(24).await?;
    assert_eq!(password.len(), 24);
    Ok(())
}

#[tokio::test]
async fn generate_key_pair_returns_both_keys() -> Result<()> {
    let (_server, client) = setup().await?;
    let pair = client.generate_key_pair(2048).await?;
    assert!(pair.public_key.contains("PUBLIC KEY"));
    assert!(pair.private_key.contains("PRIVATE KEY"));
    Ok(())
}

#[tokio::test]
async fn html_to_pdf_writes_a_pdf() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let target = dir.path().join("page.pdf");
    client.html_to_pdf("<h1>hi</h1>", &target).await?;
    assert!(std::fs::read(&target)?.starts_with(b"%PDF-"));
    Ok(())
}

#[tokio::test]
async fn html_file_to_pdf_writes_a_pdf() -> Result<()> {
    let (_server, client) = setup().await?;
    let dir = tempfile::tempdir()?;

    let source = dir.path().join("page.html");
    std::fs::write(&source, "<h1>hi</h1>")?;
    let target = dir.path().join("page.pdf");

    client.html_file_to_pdf(&source, &target).await?;
    assert!(std::fs::read(&target)?.starts_with(b"%PDF-"));
    Ok(())
}
