//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ErrorCategory, FlowError, GeminiError, GeminiErrorKind, ImageError,
    ImageErrorKind, JsonError, OutputError, OutputErrorKind, SchemaError, TemplateError,
};

/// Every failure the Scriptura crates can produce.
///
/// # Examples
///
/// ```
/// use scriptura_error::{ConfigError, ConfigErrorKind, ScripturaError};
///
/// let config_err = ConfigError::new(ConfigErrorKind::Parse("missing field".into()));
/// let err: ScripturaError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScripturaErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini text model error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Diffusion image API error
    #[from(ImageError)]
    Image(ImageError),
    /// Schema violation
    #[from(SchemaError)]
    Schema(SchemaError),
    /// Prompt template error
    #[from(TemplateError)]
    Template(TemplateError),
    /// Model output error
    #[from(OutputError)]
    Output(OutputError),
    /// Classified flow failure
    #[from(FlowError)]
    Flow(FlowError),
}

/// Scriptura error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scriptura_error::{ConfigError, ConfigErrorKind, ScripturaResult};
///
/// fn might_fail() -> ScripturaResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Build("no sources".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scriptura Error: {}", _0)]
pub struct ScripturaError(Box<ScripturaErrorKind>);

impl ScripturaError {
    /// Create a new error from a kind.
    pub fn new(kind: ScripturaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScripturaErrorKind {
        &self.0
    }

    /// Structured HTTP status code behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind() {
            ScripturaErrorKind::Gemini(e) => e.kind.status_code(),
            ScripturaErrorKind::Image(e) => e.kind.status_code(),
            _ => None,
        }
    }

    /// The underlying message without source location.
    ///
    /// Image failures keep their "Image generation failed: " prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_error::{GeminiError, GeminiErrorKind, ScripturaError};
    ///
    /// let err = ScripturaError::from(GeminiError::new(GeminiErrorKind::EmptyResponse));
    /// assert_eq!(err.detail(), "Model returned empty output");
    /// ```
    pub fn detail(&self) -> String {
        match self.kind() {
            ScripturaErrorKind::Image(e) => e.message(),
            _ => self.reason(),
        }
    }

    /// Like [`detail`](Self::detail), without any operation prefix.
    ///
    /// Used when the caller supplies its own context.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_error::{ImageError, ImageErrorKind, ScripturaError};
    ///
    /// let err = ScripturaError::from(ImageError::new(ImageErrorKind::InvalidApiKey));
    /// assert_eq!(err.reason(), "Invalid API key");
    /// assert_eq!(err.detail(), "Image generation failed: Invalid API key");
    /// ```
    pub fn reason(&self) -> String {
        match self.kind() {
            ScripturaErrorKind::Json(e) => e.kind.to_string(),
            ScripturaErrorKind::Builder(e) => e.message.clone(),
            ScripturaErrorKind::Config(e) => e.kind.to_string(),
            ScripturaErrorKind::Gemini(e) => e.kind.to_string(),
            ScripturaErrorKind::Image(e) => e.kind.to_string(),
            ScripturaErrorKind::Schema(e) => e.kind().to_string(),
            ScripturaErrorKind::Template(e) => e.kind.to_string(),
            ScripturaErrorKind::Output(e) => e.kind.to_string(),
            ScripturaErrorKind::Flow(e) => e.message.clone(),
        }
    }

    /// Classify this error.
    ///
    /// A structured status code decides first (429 is a rate limit, any
    /// other status a provider error). Provider and transport failures
    /// with no status fall back to inspecting the message text.
    pub fn category(&self) -> ErrorCategory {
        match self.status_code() {
            Some(429) => return ErrorCategory::RateLimited,
            Some(_) => return ErrorCategory::Provider,
            None => {}
        }

        match self.kind() {
            ScripturaErrorKind::Schema(_)
            | ScripturaErrorKind::Template(_)
            | ScripturaErrorKind::Builder(_) => {
                ErrorCategory::InvalidInput
            }
            ScripturaErrorKind::Config(_) => ErrorCategory::MissingConfig,
            ScripturaErrorKind::Json(_) => ErrorCategory::InvalidOutput,
            ScripturaErrorKind::Output(e) => match e.kind {
                OutputErrorKind::Empty => ErrorCategory::EmptyOutput,
                _ => ErrorCategory::InvalidOutput,
            },
            ScripturaErrorKind::Flow(e) => e.category,
            ScripturaErrorKind::Gemini(e) => match &e.kind {
                GeminiErrorKind::MissingApiKey => ErrorCategory::MissingConfig,
                GeminiErrorKind::EmptyResponse => ErrorCategory::EmptyOutput,
                other if ErrorCategory::looks_rate_limited(&other.to_string()) => {
                    ErrorCategory::RateLimited
                }
                _ => ErrorCategory::Provider,
            },
            ScripturaErrorKind::Image(e) => match &e.kind {
                ImageErrorKind::MissingApiKey => ErrorCategory::MissingConfig,
                other if ErrorCategory::looks_rate_limited(&other.to_string()) => {
                    ErrorCategory::RateLimited
                }
                ImageErrorKind::Network(_) => ErrorCategory::Transport,
                ImageErrorKind::InvalidResponse(_) => ErrorCategory::InvalidOutput,
                _ => ErrorCategory::Provider,
            },
        }
    }
}

// Generic From implementation for any type that converts to ScripturaErrorKind
impl<T> From<T> for ScripturaError
where
    T: Into<ScripturaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scriptura operations.
pub type ScripturaResult<T> = std::result::Result<T, ScripturaError>;
