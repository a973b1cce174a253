//! Scripted text model for testing.

use async_trait::async_trait;
use scriptura_core::{GenerateRequest, GenerateResponse, Output};
use scriptura_error::{GeminiError, GeminiErrorKind, ScripturaError, ScripturaResult};
use scriptura_interface::ScripturaDriver;
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(GeminiErrorKind),
    /// Answer with text derived from the prompt
    Echo(fn(&str) -> String),
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(String),
    Json(serde_json::Value),
    Error(GeminiErrorKind),
}

/// Mock text model for testing.
///
/// Records every request so tests can inspect what the flow sent.
pub struct MockDriver {
    behavior: MockBehavior,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    json_mode: bool,
}

#[allow(dead_code)]
impl MockDriver {
    /// Create a mock that always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Create a mock that always fails with the given error.
    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Create a mock whose reply is computed from the user prompt.
    pub fn new_echo(reply: fn(&str) -> String) -> Self {
        Self::new_with_behavior(MockBehavior::Echo(reply))
    }

    /// Create a mock with a sequence of responses.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Create a mock with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            json_mode: true,
        }
    }

    /// Pretend the backend has no native JSON mode.
    pub fn without_json_mode(mut self) -> Self {
        self.json_mode = false;
        self
    }

    /// Get the number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// User prompt of the most recent request.
    pub fn last_prompt(&self) -> String {
        let requests = self.requests.lock().unwrap();
        let request = requests.last().expect("no request recorded");
        user_prompt(request).to_string()
    }

    fn next_response(&self, req: &GenerateRequest) -> ScripturaResult<GenerateResponse> {
        let mut requests = self.requests.lock().unwrap();
        let current_count = requests.len();
        requests.push(req.clone());
        drop(requests);

        let text = |text: &str| GenerateResponse {
            outputs: vec![Output::Text(text.to_string())],
        };
        let error = |kind: &GeminiErrorKind| ScripturaError::from(GeminiError::new(kind.clone()));

        match &self.behavior {
            MockBehavior::Success(reply) => Ok(text(reply)),
            MockBehavior::Error(kind) => Err(error(kind)),
            MockBehavior::Echo(reply) => Ok(text(&reply(user_prompt(req)))),
            MockBehavior::Sequence(responses) => match responses.get(current_count) {
                Some(MockResponse::Success(reply)) => Ok(text(reply)),
                Some(MockResponse::Json(value)) => Ok(GenerateResponse {
                    outputs: vec![Output::Json(value.clone())],
                }),
                Some(MockResponse::Error(kind)) => Err(error(kind)),
                None => Err(error(&GeminiErrorKind::ApiRequest(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current_count + 1,
                    responses.len()
                )))),
            },
        }
    }
}

fn user_prompt(req: &GenerateRequest) -> &str {
    req.messages()
        .iter()
        .rev()
        .find(|m| m.role == scriptura_core::Role::User)
        .map(|m| m.content.as_str())
        .unwrap_or_default()
}

#[async_trait]
impl ScripturaDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ScripturaResult<GenerateResponse> {
        // Yield so concurrent flows interleave
        tokio::task::yield_now().await;
        self.next_response(req)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }

    fn supports_json_mode(&self) -> bool {
        self.json_mode
    }
}
