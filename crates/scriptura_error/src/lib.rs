//! Error types for the Scriptura library.
//!
//! This crate provides the error types used throughout the Scriptura workspace.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! [`ScripturaError`] wraps every kind and knows how to classify itself into
//! an [`ErrorCategory`]. Flows turn that into a [`FlowError`] whose message is
//! safe to show to end users.
//!
//! # Examples
//!
//! ```
//! use scriptura_error::{ErrorCategory, GeminiError, GeminiErrorKind, ScripturaError};
//!
//! let err = ScripturaError::from(GeminiError::new(GeminiErrorKind::HttpError {
//!     status_code: 429,
//!     message: "Resource exhausted".to_string(),
//! }));
//! assert_eq!(err.category(), ErrorCategory::RateLimited);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod flow;
mod gemini;
mod image;
mod json;
mod schema;

pub use builder::BuilderError;
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ScripturaError, ScripturaErrorKind, ScripturaResult};
pub use flow::{ErrorCategory, FlowError, OutputError, OutputErrorKind, RATE_LIMIT_NOTICE};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use image::{ImageError, ImageErrorKind};
pub use json::{JsonError, JsonErrorKind};
pub use schema::{SchemaError, SchemaErrorKind, TemplateError, TemplateErrorKind};
