//! Google Gemini API implementation.
//!
//! [`GeminiClient`] keeps one `gemini_rust::Gemini` per model name, created
//! lazily on first use, so flows configured with different models share a
//! single client value.
//!
//! # Example
//!
//! ```no_run
//! use scriptura_models::GeminiClient;
//! use scriptura_core::{GenerateRequest, Message};
//! use scriptura_interface::ScripturaDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("gemini-2.0-flash")?;
//!
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("Name three lighthouse keepers")])
//!     .model("gemini-2.5-flash")
//!     .build()?;
//! let response = client.generate(&request).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, instrument};

use gemini_rust::{Gemini, client::Model};

use scriptura_core::{GenerateRequest, GenerateResponse, Output, ResponseFormat, Role};
use scriptura_error::{GeminiError, GeminiErrorKind, ScripturaResult};
use scriptura_interface::ScripturaDriver;

use super::GeminiResult;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Client for the Google Gemini API.
///
/// Cloning is cheap; clones share the per-model client pool.
#[derive(Clone)]
pub struct GeminiClient {
    /// Clients keyed by model name
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// API key for creating new clients
    api_key: String,
    /// Model used when a request does not name one
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum.
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash") (preserved)
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Create a client using the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] if the variable is unset or blank.
    #[instrument(name = "gemini_client_new")]
    pub fn new(default_model: &str) -> ScripturaResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).unwrap_or_default();
        Ok(Self::with_api_key(api_key, default_model)?)
    }

    /// Create a client with an explicit API key.
    ///
    /// No network traffic happens until the first request.
    pub fn with_api_key(api_key: impl Into<String>, default_model: &str) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        Ok(Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key,
            model_name: default_model.to_string(),
        })
    }

    /// Fetch the pooled client for a model, creating it on first use.
    fn client_for(&self, model_name: &str) -> GeminiResult<Gemini> {
        let mut clients = self.clients.lock().map_err(|_| {
            GeminiError::new(GeminiErrorKind::ClientCreation(
                "client pool lock poisoned".to_string(),
            ))
        })?;

        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        debug!(model = %model_name, "Creating Gemini client for model");
        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        Ok(client)
    }

    /// Internal generate method that returns Gemini-specific errors.
    #[instrument(skip(self, req), fields(model))]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let model_name = req.model().as_deref().unwrap_or(&self.model_name);
        tracing::Span::current().record("model", model_name);

        let client = self.client_for(model_name)?;
        let mut builder = client.generate_content();

        let mut system_prompt: Option<String> = None;
        for msg in req.messages() {
            match msg.role {
                // Gemini takes a single system instruction; later ones are appended
                Role::System => {
                    system_prompt = Some(match system_prompt {
                        Some(existing) => format!("{}\n\n{}", existing, msg.content),
                        None => msg.content.clone(),
                    });
                }
                Role::User => {
                    builder = builder.with_user_message(&msg.content);
                }
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }

        if let Some(temp) = req.temperature() {
            builder = builder.with_temperature(*temp);
        }

        if let Some(max_tok) = req.max_tokens() {
            builder = builder.with_max_output_tokens(output_token_cap(*max_tok));
        }

        if *req.response_format() == ResponseFormat::Json {
            builder = builder.with_response_mime_type("application/json");
        }

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
        }

        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured GeminiError
    /// with HTTP status codes when available.
    pub(crate) fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let code_str = &error_msg[code_start + 5..];
        let end = code_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(code_str.len());
        code_str[..end].parse().ok()
    }
}

#[async_trait]
impl ScripturaDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> ScripturaResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn supports_json_mode(&self) -> bool {
        true
    }
}

static SHARED_GEMINI: OnceLock<Arc<GeminiClient>> = OnceLock::new();

/// Process-wide Gemini client, created on first call from the environment.
///
/// Later calls return the same client regardless of `default_model`.
///
/// # Errors
///
/// Fails while `GEMINI_API_KEY` is unset. A failed call does not poison
/// the slot, so a later call can still succeed.
pub fn shared_gemini(default_model: &str) -> ScripturaResult<Arc<GeminiClient>> {
    if let Some(client) = SHARED_GEMINI.get() {
        return Ok(Arc::clone(client));
    }

    let client = Arc::new(GeminiClient::new(default_model)?);
    Ok(Arc::clone(SHARED_GEMINI.get_or_init(|| client)))
}

/// Gemini takes a signed cap; larger values saturate.
fn output_token_cap(max_tokens: u32) -> i32 {
    i32::try_from(max_tokens).unwrap_or(i32::MAX)
}
