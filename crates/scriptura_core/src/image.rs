//! Request and response types for image generation.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single image generation request.
///
/// Only the prompt and dimensions are required. Unset generation
/// parameters fall back to the generator's configured defaults.
///
/// # Examples
///
/// ```
/// use scriptura_core::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .prompt("a castle at sunset")
///     .width(720u32)
///     .height(1280u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.width(), 720);
/// assert!(request.steps().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
pub struct ImageRequest {
    /// Text prompt describing the image
    #[builder(setter(into))]
    prompt: String,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Override for the negative prompt
    #[builder(default, setter(into, strip_option))]
    negative_prompt: Option<String>,
    /// Override for the number of diffusion steps
    #[builder(default, setter(strip_option))]
    steps: Option<u32>,
    /// Override for the guidance scale
    #[builder(default, setter(strip_option))]
    guidance: Option<f32>,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// A generated image, inlined as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageResponse {
    /// `data:<mime>;base64,<payload>`
    data_uri: String,
    /// Seed reported by the provider
    seed: Option<u64>,
}

impl ImageResponse {
    /// Package a base64 payload as a data URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_core::ImageResponse;
    ///
    /// let image = ImageResponse::from_base64("image/jpeg", "QUJD", Some(7));
    /// assert_eq!(image.data_uri(), "data:image/jpeg;base64,QUJD");
    /// ```
    pub fn from_base64(mime: &str, payload: &str, seed: Option<u64>) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime, payload),
            seed,
        }
    }

    /// Consume the response, keeping only the data URI.
    pub fn into_data_uri(self) -> String {
        self.data_uri
    }
}
