//! Request and response types for text generation.

use crate::{Message, Output};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Shape the caller wants the model to answer in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use scriptura_core::{GenerateRequest, Message, ResponseFormat};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Write a haiku about lighthouses")])
///     .model("gemini-2.0-flash")
///     .temperature(0.9)
///     .response_format(ResponseFormat::Json)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(request.model().as_deref(), Some("gemini-2.0-flash"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Builder, Getters)]
#[builder(default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(strip_option))]
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    #[builder(setter(strip_option))]
    temperature: Option<f32>,
    /// Model identifier to use
    #[builder(setter(into, strip_option))]
    model: Option<String>,
    /// Requested response shape
    response_format: ResponseFormat,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use scriptura_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Once upon a time".to_string())],
/// };
///
/// assert_eq!(response.first_text(), Some("Once upon a time"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Text of the first text output, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.outputs.iter().find_map(|output| match output {
            Output::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether the response carries no usable content.
    pub fn is_empty(&self) -> bool {
        self.outputs.iter().all(|output| match output {
            Output::Text(text) => text.trim().is_empty(),
            Output::Json(value) => value.is_null(),
        })
    }
}
