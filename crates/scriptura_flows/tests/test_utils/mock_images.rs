//! Mock image generator for testing.

use async_trait::async_trait;
use scriptura_core::{ImageRequest, ImageResponse};
use scriptura_error::{ImageError, ImageErrorKind, ScripturaResult};
use scriptura_interface::ImageGenerator;
use std::sync::{Arc, Mutex};

/// Returns a fixed payload or a fixed error and records requests.
pub struct MockImageGenerator {
    result: Result<String, ImageErrorKind>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

#[allow(dead_code)]
impl MockImageGenerator {
    /// Always succeed with `payload` as a JPEG.
    pub fn new_success(payload: impl Into<String>) -> Self {
        Self {
            result: Ok(payload.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `kind`.
    pub fn new_error(kind: ImageErrorKind) -> Self {
        Self {
            result: Err(kind),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, req: &ImageRequest) -> ScripturaResult<ImageResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match &self.result {
            Ok(payload) => Ok(ImageResponse::from_base64("image/jpeg", payload, Some(1))),
            Err(kind) => Err(ImageError::new(kind.clone()).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock-images"
    }
}
