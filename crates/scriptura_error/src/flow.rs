//! Flow-level errors and failure classification.

/// Fixed user-facing message for throttled requests.
pub const RATE_LIMIT_NOTICE: &str =
    "You've reached the rate limit for the AI service. Please wait a moment and try again.";

/// Problems with what the model sent back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OutputErrorKind {
    /// No usable text or JSON in the reply
    #[display("Model returned empty output")]
    Empty,
    /// Reply could not be parsed into the expected shape
    #[display("Model output could not be parsed: {}", _0)]
    Unparseable(String),
    /// Reply parsed but failed output validation
    #[display("Model output failed validation: {}", _0)]
    Invalid(String),
}

/// Output error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Output Error: {} at line {} in {}", kind, line, file)]
pub struct OutputError {
    /// The kind of error that occurred
    pub kind: OutputErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl OutputError {
    /// Create a new output error with caller location tracking.
    #[track_caller]
    pub fn new(kind: OutputErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Broad failure category a flow error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ErrorCategory {
    /// Request failed schema or template checks
    #[display("invalid_input")]
    InvalidInput,
    /// Model produced nothing
    #[display("empty_output")]
    EmptyOutput,
    /// Model produced something of the wrong shape
    #[display("invalid_output")]
    InvalidOutput,
    /// Provider throttled the request
    #[display("rate_limited")]
    RateLimited,
    /// Provider answered with an error status
    #[display("provider")]
    Provider,
    /// No response reached us
    #[display("transport")]
    Transport,
    /// Required configuration such as an API key is absent
    #[display("missing_config")]
    MissingConfig,
}

impl ErrorCategory {
    /// Whether free text looks like a throttling message.
    ///
    /// Only consulted for provider failures that carry no status code.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_error::ErrorCategory;
    ///
    /// assert!(ErrorCategory::looks_rate_limited("Rate Limit exceeded for project"));
    /// assert!(ErrorCategory::looks_rate_limited("upstream returned 429"));
    /// assert!(!ErrorCategory::looks_rate_limited("quota ok"));
    /// ```
    pub fn looks_rate_limited(message: &str) -> bool {
        message.contains("429") || message.to_lowercase().contains("rate limit")
    }
}

/// A classified flow failure carrying the message shown to users.
///
/// Displays as the bare message so callers can surface it directly.
///
/// # Examples
///
/// ```
/// use scriptura_error::{ErrorCategory, FlowError};
///
/// let err = FlowError::new("character_quote", ErrorCategory::EmptyOutput,
///     "Quote generation failed: Model returned empty output");
/// assert_eq!(err.to_string(), "Quote generation failed: Model returned empty output");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{}", message)]
pub struct FlowError {
    /// Name of the flow that failed
    pub flow: String,
    /// Failure category
    pub category: ErrorCategory,
    /// User-facing message
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FlowError {
    /// Create a new flow error with caller location tracking.
    #[track_caller]
    pub fn new(flow: impl Into<String>, category: ErrorCategory, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            flow: flow.into(),
            category,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this failure was a rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.category == ErrorCategory::RateLimited
    }
}
