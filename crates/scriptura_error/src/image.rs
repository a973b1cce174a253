//! Image generation error types.

/// Failure conditions of the hosted diffusion API.
///
/// Status-bearing variants keep the HTTP status so callers can classify
/// failures without inspecting message text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ImageErrorKind {
    /// No API key was supplied
    #[display("API key is required")]
    MissingApiKey,
    /// 401 from the provider
    #[display("Invalid API key")]
    InvalidApiKey,
    /// 402 from the provider
    #[display("Insufficient credits")]
    InsufficientCredits,
    /// 422 from the provider, with its detail
    #[display("Invalid parameters: {}", _0)]
    InvalidParameters(String),
    /// 5xx from the provider
    #[display("Server error ({}): {}", status, detail)]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Provider-supplied detail
        detail: String,
    },
    /// Any other non-success status
    #[display("Unexpected status {}: {}", status, detail)]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Provider-supplied detail
        detail: String,
    },
    /// A successful response without a usable image payload
    #[display("Invalid response from image API: {}", _0)]
    InvalidResponse(String),
    /// The request never produced an HTTP response
    #[display("Network error: {}", _0)]
    Network(String),
}

impl ImageErrorKind {
    /// HTTP status code behind this failure, if the provider answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ImageErrorKind::InvalidApiKey => Some(401),
            ImageErrorKind::InsufficientCredits => Some(402),
            ImageErrorKind::InvalidParameters(_) => Some(422),
            ImageErrorKind::ServerError { status, .. }
            | ImageErrorKind::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Image generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use scriptura_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::InsufficientCredits);
/// assert!(err.to_string().starts_with("Image generation failed: Insufficient credits"));
/// assert_eq!(err.message(), "Image generation failed: Insufficient credits");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image generation failed: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new ImageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// User-facing message without source location.
    pub fn message(&self) -> String {
        format!("Image generation failed: {}", self.kind)
    }
}
