//! Tests for the getimg.ai client against a local stub server.

mod test_utils;

use scriptura_config::ImageSettings;
use scriptura_core::ImageRequest;
use scriptura_error::{ErrorCategory, ImageErrorKind, ScripturaError};
use scriptura_interface::ImageGenerator;
use scriptura_models::GetimgClient;
use std::time::Duration;
use test_utils::StubServer;
use tokio::net::TcpListener;

const JPEG_B64: &str = "/9j/4AAQSkZJRgABAQ==";

fn settings_for(url: &str) -> ImageSettings {
    ImageSettings {
        endpoint: url.to_string(),
        ..ImageSettings::default()
    }
}

#[tokio::test]
async fn test_round_trip_returns_data_uri() -> anyhow::Result<()> {
    let body = format!(r#"{{"image":"{}","seed":42}}"#, JPEG_B64);
    let server = StubServer::respond(200, &body).await;
    let client = GetimgClient::new("test-key", settings_for(&server.url))?;

    let uri = client
        .generate_data_uri("a castle at sunset", 720, 1280)
        .await?;

    assert_eq!(uri, format!("data:image/jpeg;base64,{}", JPEG_B64));

    let request = server.captured().await;
    assert!(request.request_line.starts_with("POST /text-to-image"));
    assert_eq!(request.header("authorization"), Some("Bearer test-key"));

    let sent = request.json();
    assert_eq!(sent["prompt"], "a castle at sunset");
    assert_eq!(sent["width"], 720);
    assert_eq!(sent["height"], 1280);
    assert_eq!(sent["model"], "stable-diffusion-xl-v1-0");
    assert_eq!(sent["steps"], 25);
    assert_eq!(sent["guidance"], 7.5);
    assert_eq!(sent["output_format"], "jpeg");
    assert_eq!(
        sent["negative_prompt"],
        "blurry, low quality, distorted, deformed, watermark, text"
    );
    Ok(())
}

#[tokio::test]
async fn test_png_format_changes_mime_type() -> anyhow::Result<()> {
    let body = format!(r#"{{"image":"{}"}}"#, JPEG_B64);
    let server = StubServer::respond(200, &body).await;
    let settings = ImageSettings {
        output_format: "png".to_string(),
        ..settings_for(&server.url)
    };
    let client = GetimgClient::new("test-key", settings)?;

    let uri = client.generate_data_uri("a lighthouse", 1024, 1024).await?;
    assert!(uri.starts_with("data:image/png;base64,"));
    Ok(())
}

#[tokio::test]
async fn test_request_overrides_reach_the_wire() -> anyhow::Result<()> {
    let body = format!(r#"{{"image":"{}","seed":7}}"#, JPEG_B64);
    let server = StubServer::respond(200, &body).await;
    let client = GetimgClient::new("test-key", settings_for(&server.url))?;

    let request = ImageRequest::builder()
        .prompt("a foggy harbour")
        .width(1280u32)
        .height(720u32)
        .steps(40u32)
        .negative_prompt("people")
        .build()?;
    let image = client.generate_image(&request).await?;

    assert_eq!(*image.seed(), Some(7));
    let sent = server.captured().await.json();
    assert_eq!(sent["steps"], 40);
    assert_eq!(sent["negative_prompt"], "people");
    Ok(())
}

async fn failure_for(status: u16, body: &str) -> anyhow::Result<scriptura_error::ImageError> {
    let server = StubServer::respond(status, body).await;
    let client = GetimgClient::new("test-key", settings_for(&server.url))?;
    let err = client
        .generate_data_uri("a castle at sunset", 720, 1280)
        .await
        .expect_err("request should fail");
    server.captured().await;
    Ok(err)
}

#[tokio::test]
async fn test_401_is_invalid_api_key() -> anyhow::Result<()> {
    let err = failure_for(401, r#"{"error":{"message":"bad key"}}"#).await?;
    assert_eq!(err.kind, ImageErrorKind::InvalidApiKey);
    assert_eq!(err.message(), "Image generation failed: Invalid API key");
    Ok(())
}

#[tokio::test]
async fn test_402_is_insufficient_credits() -> anyhow::Result<()> {
    let err = failure_for(402, "{}").await?;
    assert_eq!(err.kind, ImageErrorKind::InsufficientCredits);
    assert_eq!(err.message(), "Image generation failed: Insufficient credits");
    Ok(())
}

#[tokio::test]
async fn test_422_carries_provider_detail() -> anyhow::Result<()> {
    let err = failure_for(422, r#"{"error":{"message":"width must be a multiple of 64"}}"#).await?;
    assert_eq!(
        err.message(),
        "Image generation failed: Invalid parameters: width must be a multiple of 64"
    );
    Ok(())
}

#[tokio::test]
async fn test_500_is_server_error() -> anyhow::Result<()> {
    let err = failure_for(500, r#"{"message":"model crashed"}"#).await?;
    assert_eq!(
        err.message(),
        "Image generation failed: Server error (500): model crashed"
    );
    Ok(())
}

#[tokio::test]
async fn test_429_classifies_as_rate_limited() -> anyhow::Result<()> {
    let err = failure_for(429, r#"{"error":"slow down"}"#).await?;
    assert!(matches!(
        err.kind,
        ImageErrorKind::UnexpectedStatus { status: 429, .. }
    ));
    assert_eq!(
        ScripturaError::from(err).category(),
        ErrorCategory::RateLimited
    );
    Ok(())
}

#[tokio::test]
async fn test_success_without_image_is_invalid_response() -> anyhow::Result<()> {
    let err = failure_for(200, r#"{"seed":1}"#).await?;
    assert!(matches!(err.kind, ImageErrorKind::InvalidResponse(_)));
    assert!(err.message().starts_with("Image generation failed: "));
    Ok(())
}

#[tokio::test]
async fn test_non_base64_image_is_invalid_response() -> anyhow::Result<()> {
    let err = failure_for(200, r#"{"image":"not base64 at all!"}"#).await?;
    assert!(matches!(err.kind, ImageErrorKind::InvalidResponse(_)));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() -> anyhow::Result<()> {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = GetimgClient::new("test-key", settings_for(&format!("http://{}/x", addr)))?;
    let err = client
        .generate_data_uri("a castle at sunset", 720, 1280)
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err.kind, ImageErrorKind::Network(_)));
    assert!(err.message().starts_with("Image generation failed: Network error"));
    assert_eq!(
        ScripturaError::from(err).category(),
        ErrorCategory::Transport
    );
    Ok(())
}

#[tokio::test]
async fn test_blank_key_fails_without_request() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/text-to-image", listener.local_addr()?);

    let err = GetimgClient::new("   ", settings_for(&url)).expect_err("blank key");
    assert_eq!(err.kind, ImageErrorKind::MissingApiKey);
    assert_eq!(err.message(), "Image generation failed: API key is required");

    let err = scriptura_models::fetch_image_data_uri("a castle", Some(""), 720, 1280)
        .await
        .expect_err("empty key");
    assert_eq!(err.kind, ImageErrorKind::MissingApiKey);

    let accepted = tokio::time::timeout(Duration::from_millis(50), listener.accept()).await;
    assert!(accepted.is_err(), "no connection should have been made");
    Ok(())
}
