//! Trait definitions for model backends.

use async_trait::async_trait;
use scriptura_core::{GenerateRequest, GenerateResponse, ImageRequest, ImageResponse};
use scriptura_error::ScripturaResult;

/// Core trait that every text model backend implements.
///
/// One call is one outbound request: implementations do not retry.
#[async_trait]
pub trait ScripturaDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> ScripturaResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model used when a request does not name one.
    fn model_name(&self) -> &str;

    /// Whether the backend can be asked for a JSON-only reply.
    fn supports_json_mode(&self) -> bool {
        false
    }
}

/// Trait for hosted image generation services.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return it inline.
    async fn generate_image(&self, req: &ImageRequest) -> ScripturaResult<ImageResponse>;

    /// Provider name (e.g., "getimg").
    fn provider_name(&self) -> &'static str;
}
