//! JSON error types.

/// Which direction a JSON conversion failed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// A value could not be turned into JSON
    #[display("Failed to serialize {}: {}", what, message)]
    Serialize {
        /// What was being serialized, e.g. "flow request"
        what: &'static str,
        /// serde_json error text
        message: String,
    },
    /// JSON text did not parse
    #[display("Failed to parse {}: {}", what, message)]
    Parse {
        /// What was being parsed
        what: &'static str,
        /// serde_json error text
        message: String,
    },
}

/// JSON serialization/deserialization error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", kind, line, file)]
pub struct JsonError {
    /// What failed
    pub kind: JsonErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError of the given kind at the current location.
    #[track_caller]
    pub fn new(kind: JsonErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Serialization failure for `what`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_error::JsonError;
    ///
    /// let err = JsonError::serialize("response", "key must be a string");
    /// assert_eq!(err.kind.to_string(), "Failed to serialize response: key must be a string");
    /// ```
    #[track_caller]
    pub fn serialize(what: &'static str, error: impl std::fmt::Display) -> Self {
        Self::new(JsonErrorKind::Serialize {
            what,
            message: error.to_string(),
        })
    }

    /// Parse failure for `what`.
    #[track_caller]
    pub fn parse(what: &'static str, error: impl std::fmt::Display) -> Self {
        Self::new(JsonErrorKind::Parse {
            what,
            message: error.to_string(),
        })
    }
}
