//! Google Gemini API client implementation.
//!
//! The client supports:
//! - Per-request model selection
//! - Client pooling with lazy initialization
//! - Native JSON responses via the response MIME type
//! - A process-wide shared instance ([`shared_gemini`])

mod client;

pub use client::{GEMINI_API_KEY_ENV, GeminiClient, shared_gemini};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, scriptura_error::GeminiError>;
