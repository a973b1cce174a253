//! getimg.ai text-to-image client.
//!
//! The service answers a JSON POST with a base64 image, which is handed
//! back to callers as a `data:` URI ready to embed in a page.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use tracing::{debug, error, instrument};

use scriptura_config::ImageSettings;
use scriptura_core::{ImageRequest, ImageResponse};
use scriptura_error::{ImageError, ImageErrorKind, ScripturaResult};
use scriptura_interface::ImageGenerator;

/// Environment variable holding the getimg.ai API key.
pub const GETIMG_API_KEY_ENV: &str = "GETIMG_API_KEY";

/// Longest provider detail carried into an error message.
const MAX_DETAIL_CHARS: usize = 512;

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

#[derive(Debug, Serialize)]
struct TextToImageBody<'a> {
    model: &'a str,
    prompt: &'a str,
    negative_prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    guidance: f32,
    output_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TextToImageReply {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
}

/// Client for the getimg.ai text-to-image endpoint.
///
/// # Example
///
/// ```no_run
/// use scriptura_config::ImageSettings;
/// use scriptura_models::GetimgClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GetimgClient::new("key-from-somewhere", ImageSettings::default())?;
/// let uri = client.generate_data_uri("a castle at sunset", 720, 1280).await?;
/// assert!(uri.starts_with("data:image/jpeg;base64,"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GetimgClient {
    http: reqwest::Client,
    api_key: String,
    settings: ImageSettings,
}

impl std::fmt::Debug for GetimgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetimgClient")
            .field("endpoint", &self.settings.endpoint)
            .field("model", &self.settings.model)
            .finish_non_exhaustive()
    }
}

impl GetimgClient {
    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`ImageErrorKind::MissingApiKey`] for a blank key.
    pub fn new(api_key: impl Into<String>, settings: ImageSettings) -> ImageResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ImageError::new(ImageErrorKind::MissingApiKey));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            settings,
        })
    }

    /// Create a client using the `GETIMG_API_KEY` environment variable.
    pub fn from_env(settings: ImageSettings) -> ImageResult<Self> {
        Self::new(env::var(GETIMG_API_KEY_ENV).unwrap_or_default(), settings)
    }

    /// Settings this client sends with every request.
    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Generate one image and return it as a data URI.
    ///
    /// # Errors
    ///
    /// Every failure carries the "Image generation failed: " prefix; see
    /// [`ImageErrorKind`] for the cases.
    pub async fn generate_data_uri(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> ImageResult<String> {
        let request = ImageRequest::builder()
            .prompt(prompt)
            .width(width)
            .height(height)
            .build()
            .map_err(|e| ImageError::new(ImageErrorKind::InvalidParameters(e.to_string())))?;

        self.text_to_image(&request)
            .await
            .map(ImageResponse::into_data_uri)
    }

    #[instrument(skip(self, request), fields(width = *request.width(), height = *request.height()))]
    async fn text_to_image(&self, request: &ImageRequest) -> ImageResult<ImageResponse> {
        let result = self.post(request).await;
        if let Err(e) = &result {
            error!(error = %e, "getimg request failed");
        }
        result
    }

    async fn post(&self, request: &ImageRequest) -> ImageResult<ImageResponse> {
        let body = TextToImageBody {
            model: &self.settings.model,
            prompt: request.prompt(),
            negative_prompt: request
                .negative_prompt()
                .as_deref()
                .unwrap_or(self.settings.negative_prompt.as_str()),
            width: *request.width(),
            height: *request.height(),
            steps: request.steps().unwrap_or(self.settings.steps),
            guidance: request.guidance().unwrap_or(self.settings.guidance),
            output_format: &self.settings.output_format,
        };

        debug!(endpoint = %self.settings.endpoint, "Sending text-to-image request");

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageError::new(ImageErrorKind::Network(e.to_string())))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ImageError::new(ImageErrorKind::Network(e.to_string())))?;

        if !(200..300).contains(&status) {
            return Err(ImageError::new(classify_status(status, &text)));
        }

        let reply: TextToImageReply = serde_json::from_str(&text).map_err(|e| {
            ImageError::new(ImageErrorKind::InvalidResponse(format!(
                "body is not JSON: {}",
                e
            )))
        })?;

        let image = reply
            .image
            .filter(|image| !image.trim().is_empty())
            .ok_or_else(|| {
                ImageError::new(ImageErrorKind::InvalidResponse(
                    "response contained no image".to_string(),
                ))
            })?;

        BASE64.decode(image.as_bytes()).map_err(|e| {
            ImageError::new(ImageErrorKind::InvalidResponse(format!(
                "image is not valid base64: {}",
                e
            )))
        })?;

        Ok(ImageResponse::from_base64(
            &self.settings.mime_type(),
            &image,
            reply.seed,
        ))
    }
}

#[async_trait]
impl ImageGenerator for GetimgClient {
    async fn generate_image(&self, request: &ImageRequest) -> ScripturaResult<ImageResponse> {
        Ok(self.text_to_image(request).await?)
    }

    fn provider_name(&self) -> &'static str {
        "getimg"
    }
}

/// Generate one image with the default settings.
///
/// With `api_key` absent the key is read from `GETIMG_API_KEY`. A missing
/// key fails before any request is sent.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let uri = scriptura_models::fetch_image_data_uri("a castle at sunset", None, 720, 1280).await?;
/// println!("{}", &uri[..32]);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_image_data_uri(
    prompt: &str,
    api_key: Option<&str>,
    width: u32,
    height: u32,
) -> ImageResult<String> {
    let settings = ImageSettings::default();
    let client = match api_key {
        Some(key) => GetimgClient::new(key, settings),
        None => GetimgClient::from_env(settings),
    }
    .inspect_err(|e| error!(error = %e, "Image client unavailable"))?;

    client.generate_data_uri(prompt, width, height).await
}

/// Map a non-success status to an error kind.
pub(crate) fn classify_status(status: u16, body: &str) -> ImageErrorKind {
    match status {
        401 => ImageErrorKind::InvalidApiKey,
        402 => ImageErrorKind::InsufficientCredits,
        422 => ImageErrorKind::InvalidParameters(provider_detail(body)),
        500..=599 => ImageErrorKind::ServerError {
            status,
            detail: provider_detail(body),
        },
        _ => ImageErrorKind::UnexpectedStatus {
            status,
            detail: provider_detail(body),
        },
    }
}

/// Best human-readable detail from an error body.
///
/// Looks for `error.message`, `error`, `message` and `detail` in that
/// order, falling back to the raw body.
pub(crate) fn provider_detail(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .or_else(|| value.get("error").and_then(Value::as_str))
            .or_else(|| value.get("message").and_then(Value::as_str))
            .or_else(|| value.get("detail").and_then(Value::as_str))
            .map(str::to_string)
    });

    let detail = from_json.unwrap_or_else(|| body.trim().to_string());
    if detail.is_empty() {
        return "no details provided".to_string();
    }
    truncate_text(&detail, MAX_DETAIL_CHARS)
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}
