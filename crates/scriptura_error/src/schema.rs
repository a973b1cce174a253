//! Schema validation and template rendering errors.

/// Ways a value can violate its schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SchemaErrorKind {
    /// A required field is present but blank
    #[display("Field '{}' must not be empty", _0)]
    EmptyField(String),
    /// A field is outside its allowed range
    #[display("Field '{}' is out of range: {}", field, reason)]
    OutOfRange {
        /// The field name
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Schema violation with location tracking.
///
/// # Examples
///
/// ```
/// use scriptura_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::EmptyField("quote".to_string()));
/// assert!(err.to_string().contains("'quote' must not be empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Schema Error: {} at line {} in {}", kind, line, file)]
pub struct SchemaError {
    kind: SchemaErrorKind,
    line: u32,
    file: &'static str,
}

impl SchemaError {
    /// Create a new schema error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }
}

/// Template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TemplateErrorKind {
    /// A placeholder referenced a value that is missing or null
    #[display("Template value '{}' is missing", _0)]
    MissingValue(String),
    /// The template itself could not be processed
    #[display("Malformed template: {}", _0)]
    Malformed(String),
}

/// Template error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Template Error: {} at line {} in {}", kind, line, file)]
pub struct TemplateError {
    /// The kind of error that occurred
    pub kind: TemplateErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new template error with caller location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
