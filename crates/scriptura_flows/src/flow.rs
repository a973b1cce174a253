//! Flow definitions.
//!
//! A flow is data: a name, a user-facing context used in error messages, a
//! prompt template and a description of the expected output. The request
//! and response types ride along as type parameters, so one invoker can
//! run every flow.

use scriptura_core::AspectRatio;
use std::marker::PhantomData;

/// How a text flow's reply becomes its response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// The model is asked for JSON, which is extracted and deserialized.
    Json,
    /// The trimmed reply becomes the single string `field` of the response.
    Text {
        /// Response field receiving the text
        field: &'static str,
    },
}

/// A text generation flow from `I` to `O`.
///
/// # Examples
///
/// ```
/// use scriptura_flows::{OutputFormat, PromptFlow};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct Request { topic: String }
/// #[derive(Deserialize)]
/// struct Reply { joke: String }
///
/// let flow: PromptFlow<Request, Reply> = PromptFlow::new(
///     "joke",
///     "Joke generation",
///     "Tell a joke about {{topic}}. Respond as JSON: {\"joke\": \"...\"}",
///     OutputFormat::Json,
/// )
/// .with_temperature(1.0);
///
/// assert_eq!(flow.name(), "joke");
/// assert_eq!(flow.temperature(), Some(1.0));
/// ```
pub struct PromptFlow<I, O> {
    name: &'static str,
    context: &'static str,
    system: Option<&'static str>,
    template: &'static str,
    output: OutputFormat,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    _types: PhantomData<fn(&I) -> O>,
}

impl<I, O> PromptFlow<I, O> {
    /// Define a flow with no system instruction or sampling defaults.
    pub const fn new(
        name: &'static str,
        context: &'static str,
        template: &'static str,
        output: OutputFormat,
    ) -> Self {
        Self {
            name,
            context,
            system: None,
            template,
            output,
            temperature: None,
            max_tokens: None,
            _types: PhantomData,
        }
    }

    /// Set the system instruction sent ahead of the prompt.
    pub const fn with_system(mut self, system: &'static str) -> Self {
        self.system = Some(system);
        self
    }

    /// Default temperature, used when configuration has no flow override.
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Default output token cap, used when configuration has no flow override.
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Flow name, also the configuration key under `[flows]`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Label used to prefix failure messages.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// System instruction, if any.
    pub fn system(&self) -> Option<&'static str> {
        self.system
    }

    /// Prompt template.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Expected output shape.
    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Default temperature.
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Default output token cap.
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

impl<I, O> Clone for PromptFlow<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for PromptFlow<I, O> {}

impl<I, O> std::fmt::Debug for PromptFlow<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptFlow")
            .field("name", &self.name)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

/// An image flow: the rendered template is sent to the image generator and
/// the resulting data URI is wrapped into `O`.
pub struct ImageFlow<I, O> {
    name: &'static str,
    context: &'static str,
    template: &'static str,
    aspect: fn(&I) -> AspectRatio,
    wrap: fn(String) -> O,
}

impl<I, O> ImageFlow<I, O> {
    /// Define an image flow.
    ///
    /// `aspect` picks the image shape from the request; `wrap` builds the
    /// response from the data URI.
    pub const fn new(
        name: &'static str,
        context: &'static str,
        template: &'static str,
        aspect: fn(&I) -> AspectRatio,
        wrap: fn(String) -> O,
    ) -> Self {
        Self {
            name,
            context,
            template,
            aspect,
            wrap,
        }
    }

    /// Flow name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Label used to prefix failure messages.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Prompt template.
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Image shape for a request.
    pub fn aspect_ratio(&self, input: &I) -> AspectRatio {
        (self.aspect)(input)
    }

    /// Build the response from a data URI.
    pub fn wrap(&self, data_uri: String) -> O {
        (self.wrap)(data_uri)
    }
}

impl<I, O> Clone for ImageFlow<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for ImageFlow<I, O> {}

impl<I, O> std::fmt::Debug for ImageFlow<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFlow")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
