//! Configuration error types.

/// Ways loading configuration or caller-supplied files can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A source could not be read or merged
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// The merged sources do not match the expected sections
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A file named on the command line could not be read or written
    #[display("Cannot access {}: {}", path, message)]
    Io {
        /// Path as given by the caller
        path: String,
        /// I/O error text
        message: String,
    },
}

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError of the given kind at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptura_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::Parse("missing field `text`".into()));
    /// assert_eq!(err.kind.to_string(), "Failed to parse configuration: missing field `text`");
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
