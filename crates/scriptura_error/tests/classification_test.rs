//! Tests for error classification.

use scriptura_error::{
    BuilderError, ConfigError, ConfigErrorKind, ErrorCategory, GeminiError, GeminiErrorKind,
    ImageError, ImageErrorKind, OutputError, OutputErrorKind, SchemaError, SchemaErrorKind,
    ScripturaError,
};

fn gemini(kind: GeminiErrorKind) -> ScripturaError {
    GeminiError::new(kind).into()
}

fn image(kind: ImageErrorKind) -> ScripturaError {
    ImageError::new(kind).into()
}

#[test]
fn structured_429_is_rate_limited() {
    let err = gemini(GeminiErrorKind::HttpError {
        status_code: 429,
        message: "Resource has been exhausted".to_string(),
    });
    assert_eq!(err.status_code(), Some(429));
    assert_eq!(err.category(), ErrorCategory::RateLimited);
}

#[test]
fn structured_status_wins_over_message_text() {
    // A 500 whose body happens to mention a rate limit stays a provider error
    let err = gemini(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "internal error while checking rate limit".to_string(),
    });
    assert_eq!(err.category(), ErrorCategory::Provider);
}

#[test]
fn unstructured_rate_limit_text_falls_back_to_heuristic() {
    let err = gemini(GeminiErrorKind::ApiRequest(
        "Quota exceeded: RATE LIMIT reached".to_string(),
    ));
    assert_eq!(err.status_code(), None);
    assert_eq!(err.category(), ErrorCategory::RateLimited);

    let err = gemini(GeminiErrorKind::ApiRequest("got 429 from upstream".to_string()));
    assert_eq!(err.category(), ErrorCategory::RateLimited);
}

#[test]
fn image_status_codes_are_exposed() {
    assert_eq!(image(ImageErrorKind::InvalidApiKey).status_code(), Some(401));
    assert_eq!(image(ImageErrorKind::InsufficientCredits).status_code(), Some(402));
    assert_eq!(
        image(ImageErrorKind::InvalidParameters("width".to_string())).status_code(),
        Some(422)
    );
    let throttled = image(ImageErrorKind::UnexpectedStatus {
        status: 429,
        detail: "slow down".to_string(),
    });
    assert_eq!(throttled.category(), ErrorCategory::RateLimited);
}

#[test]
fn categories_for_local_failures() {
    assert_eq!(
        gemini(GeminiErrorKind::MissingApiKey).category(),
        ErrorCategory::MissingConfig
    );
    assert_eq!(
        image(ImageErrorKind::MissingApiKey).category(),
        ErrorCategory::MissingConfig
    );
    assert_eq!(
        image(ImageErrorKind::Network("connection refused".to_string())).category(),
        ErrorCategory::Transport
    );
    assert_eq!(
        ScripturaError::from(OutputError::new(OutputErrorKind::Empty)).category(),
        ErrorCategory::EmptyOutput
    );
    assert_eq!(
        ScripturaError::from(OutputError::new(OutputErrorKind::Unparseable(
            "expected value".to_string()
        )))
        .category(),
        ErrorCategory::InvalidOutput
    );
    assert_eq!(
        ScripturaError::from(SchemaError::new(SchemaErrorKind::EmptyField(
            "character".to_string()
        )))
        .category(),
        ErrorCategory::InvalidInput
    );
    assert_eq!(
        ScripturaError::from(ConfigError::new(ConfigErrorKind::Parse("bad file".to_string()))).category(),
        ErrorCategory::MissingConfig
    );
}

#[test]
fn schema_text_mentioning_429_is_not_rate_limited() {
    let err = ScripturaError::from(SchemaError::new(SchemaErrorKind::OutOfRange {
        field: "count".to_string(),
        reason: "429 exceeds maximum of 10".to_string(),
    }));
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
}

#[test]
fn detail_omits_source_location() {
    let err = gemini(GeminiErrorKind::EmptyResponse);
    assert_eq!(err.detail(), "Model returned empty output");
    assert!(err.to_string().contains("at line"));
}

#[test]
fn image_detail_names_the_failing_operation() {
    let err = image(ImageErrorKind::InvalidApiKey);
    assert_eq!(err.detail(), "Image generation failed: Invalid API key");
    assert!(!err.detail().contains("at line"));
    assert_eq!(err.reason(), "Invalid API key");
}

#[test]
fn builder_failures_record_where_they_were_raised() {
    let err = BuilderError::new("`prompt` must be initialized");
    assert_eq!(err.file, file!());
    assert_eq!(err.message, "`prompt` must be initialized");

    let err = ScripturaError::from(err);
    assert_eq!(err.category(), ErrorCategory::InvalidInput);
    assert_eq!(err.reason(), "`prompt` must be initialized");
}
