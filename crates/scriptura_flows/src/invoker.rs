//! Flow execution and failure classification.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use scriptura_config::{FlowSettings, ScripturaConfig};
use scriptura_core::{
    GenerateRequest, GenerateResponse, ImageRequest, Message, Output, ResponseFormat, Schema,
};
use scriptura_error::{
    BuilderError, ErrorCategory, FlowError, GeminiError, GeminiErrorKind, ImageError,
    ImageErrorKind, JsonError, OutputError, OutputErrorKind, RATE_LIMIT_NOTICE, ScripturaError,
    ScripturaResult,
};
use scriptura_interface::{ImageGenerator, ScripturaDriver};
use scriptura_models::{GetimgClient, shared_gemini};

use crate::{ImageFlow, OutputFormat, PromptFlow, render_template};

/// Appended to the system instruction when the driver has no native JSON mode.
const JSON_ONLY_INSTRUCTION: &str = "Respond with a single JSON object and nothing else.";

/// Runs flows against a text model, an image generator, or both.
///
/// Cloning is cheap and clones share the same backends, so independent
/// flows can run concurrently from one invoker.
///
/// # Example
///
/// ```no_run
/// use scriptura_config::{FlowSettings, ScripturaConfig};
/// use scriptura_core::CharacterProfile;
/// use scriptura_flows::{FlowInvoker, catalogue};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let invoker = FlowInvoker::from_env(ScripturaConfig::load()?);
/// let request = catalogue::CharacterQuoteRequest {
///     character: CharacterProfile::new("A retired sea captain").with_name("Ilse"),
///     situation: Some("She spots a storm on the horizon".to_string()),
/// };
/// let quote = invoker.invoke(&catalogue::character_quote(), &request).await?;
/// println!("{}", quote.quote);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FlowInvoker {
    driver: Option<Arc<dyn ScripturaDriver>>,
    images: Option<Arc<dyn ImageGenerator>>,
    config: Arc<ScripturaConfig>,
}

impl std::fmt::Debug for FlowInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowInvoker")
            .field(
                "provider",
                &self.driver.as_ref().map(|driver| driver.provider_name()),
            )
            .field("model", &self.driver.as_ref().map(|driver| driver.model_name()))
            .field(
                "images",
                &self.images.as_ref().map(|images| images.provider_name()),
            )
            .finish()
    }
}

impl FlowInvoker {
    /// Create an invoker for text flows only.
    pub fn new(driver: Arc<dyn ScripturaDriver>, config: ScripturaConfig) -> Self {
        Self {
            driver: Some(driver),
            images: None,
            config: Arc::new(config),
        }
    }

    /// Create an invoker for image flows only.
    ///
    /// Text flows fail with [`ErrorCategory::MissingConfig`].
    pub fn for_images(images: Arc<dyn ImageGenerator>, config: ScripturaConfig) -> Self {
        Self {
            driver: None,
            images: Some(images),
            config: Arc::new(config),
        }
    }

    /// Attach an image generator for image flows.
    pub fn with_image_generator(mut self, images: Arc<dyn ImageGenerator>) -> Self {
        self.images = Some(images);
        self
    }

    /// Create an invoker from environment keys.
    ///
    /// Text flows use the shared Gemini client when `GEMINI_API_KEY` is
    /// set; image flows use getimg.ai when `GETIMG_API_KEY` is set. Each
    /// kind of flow fails with a missing-configuration error when invoked
    /// without its key, so one key is enough to run its own flows.
    #[instrument(name = "flow_invoker_from_env", skip(config))]
    pub fn from_env(config: ScripturaConfig) -> Self {
        let driver = shared_gemini(&config.text.default_model)
            .inspect_err(|e| debug!(error = %e, "Text flows disabled"))
            .ok()
            .map(|client| client as Arc<dyn ScripturaDriver>);
        let images = GetimgClient::from_env(config.image.clone())
            .inspect_err(|e| debug!(error = %e, "Image flows disabled"))
            .ok()
            .map(|client| Arc::new(client) as Arc<dyn ImageGenerator>);

        Self {
            driver,
            images,
            config: Arc::new(config),
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ScripturaConfig {
        &self.config
    }

    /// Run a text flow.
    ///
    /// The request is validated, rendered and sent in one model call; the
    /// reply is parsed and validated before it is returned.
    ///
    /// # Errors
    ///
    /// Any failure is logged once and returned as a [`FlowError`] whose
    /// message reads `"<context> failed: <detail>"`, or the rate-limit
    /// notice when the provider throttled the call.
    #[instrument(skip_all, fields(flow = flow.name()))]
    pub async fn invoke<I, O>(&self, flow: &PromptFlow<I, O>, input: &I) -> Result<O, FlowError>
    where
        I: Serialize + Schema + Sync,
        O: DeserializeOwned + Schema,
    {
        self.run_text(flow, input)
            .await
            .map_err(|e| classify(flow.name(), flow.context(), e))
    }

    /// Run an image flow.
    ///
    /// # Errors
    ///
    /// As [`invoke`](Self::invoke). Without an image generator the flow
    /// fails with [`ErrorCategory::MissingConfig`].
    #[instrument(skip_all, fields(flow = flow.name()))]
    pub async fn invoke_image<I, O>(
        &self,
        flow: &ImageFlow<I, O>,
        input: &I,
    ) -> Result<O, FlowError>
    where
        I: Serialize + Schema + Sync,
        O: Schema,
    {
        self.run_image(flow, input)
            .await
            .map_err(|e| classify(flow.name(), flow.context(), e))
    }

    async fn run_text<I, O>(&self, flow: &PromptFlow<I, O>, input: &I) -> ScripturaResult<O>
    where
        I: Serialize + Schema + Sync,
        O: DeserializeOwned + Schema,
    {
        let driver = self
            .driver
            .as_ref()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        input.validate()?;
        let prompt = render(flow.template(), input)?;
        let request = self.build_request(driver.as_ref(), flow, prompt)?;

        debug!(
            model = request.model().as_deref().unwrap_or_default(),
            prompt_length = request.messages().iter().map(|m| m.content.len()).sum::<usize>(),
            "Invoking text model"
        );

        let response = driver.generate(&request).await?;
        let output: O = parse_output(flow.output(), &response)?;
        output
            .validate()
            .map_err(|e| OutputError::new(OutputErrorKind::Invalid(e.kind().to_string())))?;
        Ok(output)
    }

    async fn run_image<I, O>(&self, flow: &ImageFlow<I, O>, input: &I) -> ScripturaResult<O>
    where
        I: Serialize + Schema + Sync,
        O: Schema,
    {
        let images = self
            .images
            .as_ref()
            .ok_or_else(|| ImageError::new(ImageErrorKind::MissingApiKey))?;

        input.validate()?;
        let prompt = render(flow.template(), input)?;
        let (width, height) = flow.aspect_ratio(input).dimensions();

        debug!(width, height, provider = images.provider_name(), "Invoking image generator");

        let request = ImageRequest::builder()
            .prompt(prompt)
            .width(width)
            .height(height)
            .build()
            .map_err(|e| BuilderError::new(e.to_string()))?;

        let image = images.generate_image(&request).await?;
        let output = flow.wrap(image.into_data_uri());
        output
            .validate()
            .map_err(|e| OutputError::new(OutputErrorKind::Invalid(e.kind().to_string())))?;
        Ok(output)
    }

    /// Assemble the model request with configuration applied.
    ///
    /// Precedence: `[flows.<name>]` > flow default > `[text]`.
    fn build_request<I, O>(
        &self,
        driver: &dyn ScripturaDriver,
        flow: &PromptFlow<I, O>,
        prompt: String,
    ) -> ScripturaResult<GenerateRequest> {
        let defaults = FlowSettings {
            model: None,
            temperature: flow.temperature(),
            max_tokens: flow.max_tokens(),
        };
        let settings = self.config.flow(flow.name(), &defaults);

        let json = flow.output() == OutputFormat::Json;
        let native_json = json && driver.supports_json_mode();

        let system = match (flow.system(), json && !native_json) {
            (Some(system), true) => Some(format!("{}\n\n{}", system, JSON_ONLY_INSTRUCTION)),
            (Some(system), false) => Some(system.to_string()),
            (None, true) => Some(JSON_ONLY_INSTRUCTION.to_string()),
            (None, false) => None,
        };

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        let mut builder = GenerateRequest::builder();
        builder.messages(messages).model(settings.model).response_format(
            if native_json {
                ResponseFormat::Json
            } else {
                ResponseFormat::Text
            },
        );

        if let Some(temperature) = settings.temperature {
            builder.temperature(temperature);
        }
        if let Some(max_tokens) = settings.max_tokens {
            builder.max_tokens(max_tokens);
        }

        Ok(builder
            .build()
            .map_err(|e| BuilderError::new(e.to_string()))?)
    }
}

fn render<I: Serialize>(template: &str, input: &I) -> ScripturaResult<String> {
    let data = serde_json::to_value(input).map_err(|e| JsonError::serialize("flow request", e))?;
    Ok(render_template(template, &data)?)
}

/// Turn a model response into the flow's response type.
fn parse_output<O: DeserializeOwned>(
    format: OutputFormat,
    response: &GenerateResponse,
) -> Result<O, OutputError> {
    if response.is_empty() {
        return Err(OutputError::new(OutputErrorKind::Empty));
    }

    let value = match (format, response.outputs.first()) {
        (OutputFormat::Json, Some(Output::Json(value))) => value.clone(),
        (OutputFormat::Json, _) => {
            let text = response
                .first_text()
                .map(str::trim)
                .filter(|text| *text != "null")
                .ok_or_else(|| OutputError::new(OutputErrorKind::Empty))?;
            match crate::parse_json::<serde_json::Value>(text)? {
                serde_json::Value::Null => return Err(OutputError::new(OutputErrorKind::Empty)),
                value => value,
            }
        }
        (OutputFormat::Text { field }, _) => {
            let text = response
                .first_text()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .ok_or_else(|| OutputError::new(OutputErrorKind::Empty))?;
            let mut object = serde_json::Map::new();
            object.insert(field.to_string(), serde_json::Value::from(text));
            serde_json::Value::Object(object)
        }
    };

    serde_json::from_value(value)
        .map_err(|e| OutputError::new(OutputErrorKind::Unparseable(e.to_string())))
}

/// Log a failure once and turn it into the caller-facing error.
pub(crate) fn classify(flow: &str, context: &str, err: ScripturaError) -> FlowError {
    let category = err.category();
    error!(flow, category = %category, error = %err, "Flow failed");

    let message = if category == ErrorCategory::RateLimited {
        RATE_LIMIT_NOTICE.to_string()
    } else {
        format!("{} failed: {}", context, err.reason())
    };
    FlowError::new(flow, category, message)
}
