//! The built-in flows.
//!
//! Each flow is a constructor returning a [`PromptFlow`] or [`ImageFlow`]
//! together with its request and response types. [`FlowKind`] names them
//! for callers that only have a flow name and JSON, such as the CLI.

mod character;
mod story;
mod visual;

pub use character::{
    CharacterBackstory, CharacterBackstoryRequest, CharacterNames, CharacterNamesRequest,
    CharacterQuote, CharacterQuoteRequest, Dialogue, DialogueRequest, character_backstory,
    character_names, character_quote, dialogue,
};
pub use story::{
    PlotTwist, PlotTwistRequest, StoryContinuationRequest, StoryOpeningRequest, StoryPassage,
    StoryPremise, StoryPremiseRequest, StorySummary, StorySummaryRequest, plot_twist,
    story_continuation, story_opening, story_premise, story_summary,
};
pub use visual::{
    CharacterPortrait, CharacterPortraitRequest, ImagePrompt, ImagePromptRequest,
    ScenarioVisual, ScenarioVisualRequest, character_portrait, image_prompt, scenario_visual,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use scriptura_core::Schema;
use scriptura_error::{ErrorCategory, FlowError, JsonError};

use crate::{FlowInvoker, ImageFlow, PromptFlow, invoker::classify};

/// Every built-in flow, by name.
///
/// # Examples
///
/// ```
/// use scriptura_flows::FlowKind;
/// use strum::IntoEnumIterator;
///
/// let kind: FlowKind = "plot_twist".parse().unwrap();
/// assert_eq!(kind.context(), "Plot twist generation");
/// assert_eq!(FlowKind::iter().filter(|k| k.is_image()).count(), 2);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum FlowKind {
    /// One in-character line
    CharacterQuote,
    /// Character history
    CharacterBackstory,
    /// Name suggestions
    CharacterNames,
    /// Title and premise
    StoryPremise,
    /// First passage with choices
    StoryOpening,
    /// Next passage after a choice
    StoryContinuation,
    /// Plot twist
    PlotTwist,
    /// Two-character exchange
    Dialogue,
    /// Condensed retelling
    StorySummary,
    /// Diffusion prompt from a scene
    ImagePrompt,
    /// Generated character portrait
    CharacterPortrait,
    /// Generated scene illustration
    ScenarioVisual,
}

impl FlowKind {
    /// Flow name, also the `[flows]` configuration key.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Label used to prefix failure messages.
    pub fn context(self) -> &'static str {
        match self {
            FlowKind::CharacterQuote => character_quote().context(),
            FlowKind::CharacterBackstory => character_backstory().context(),
            FlowKind::CharacterNames => character_names().context(),
            FlowKind::StoryPremise => story_premise().context(),
            FlowKind::StoryOpening => story_opening().context(),
            FlowKind::StoryContinuation => story_continuation().context(),
            FlowKind::PlotTwist => plot_twist().context(),
            FlowKind::Dialogue => dialogue().context(),
            FlowKind::StorySummary => story_summary().context(),
            FlowKind::ImagePrompt => image_prompt().context(),
            FlowKind::CharacterPortrait => character_portrait().context(),
            FlowKind::ScenarioVisual => scenario_visual().context(),
        }
    }

    /// Whether the flow produces an image rather than text.
    pub fn is_image(self) -> bool {
        matches!(self, FlowKind::CharacterPortrait | FlowKind::ScenarioVisual)
    }

    /// Run the flow on a JSON request, returning the JSON response.
    ///
    /// # Errors
    ///
    /// A request that does not match the flow's request type fails with
    /// [`ErrorCategory::InvalidInput`]; anything else as
    /// [`FlowInvoker::invoke`].
    pub async fn invoke_json(
        self,
        invoker: &FlowInvoker,
        input: JsonValue,
    ) -> Result<JsonValue, FlowError> {
        match self {
            FlowKind::CharacterQuote => text_json(invoker, &character_quote(), input).await,
            FlowKind::CharacterBackstory => {
                text_json(invoker, &character_backstory(), input).await
            }
            FlowKind::CharacterNames => text_json(invoker, &character_names(), input).await,
            FlowKind::StoryPremise => text_json(invoker, &story_premise(), input).await,
            FlowKind::StoryOpening => text_json(invoker, &story_opening(), input).await,
            FlowKind::StoryContinuation => {
                text_json(invoker, &story_continuation(), input).await
            }
            FlowKind::PlotTwist => text_json(invoker, &plot_twist(), input).await,
            FlowKind::Dialogue => text_json(invoker, &dialogue(), input).await,
            FlowKind::StorySummary => text_json(invoker, &story_summary(), input).await,
            FlowKind::ImagePrompt => text_json(invoker, &image_prompt(), input).await,
            FlowKind::CharacterPortrait => {
                image_json(invoker, &character_portrait(), input).await
            }
            FlowKind::ScenarioVisual => image_json(invoker, &scenario_visual(), input).await,
        }
    }
}

async fn text_json<I, O>(
    invoker: &FlowInvoker,
    flow: &PromptFlow<I, O>,
    input: JsonValue,
) -> Result<JsonValue, FlowError>
where
    I: DeserializeOwned + Serialize + Schema + Sync,
    O: DeserializeOwned + Serialize + Schema,
{
    let request: I = decode_request(flow.name(), flow.context(), input)?;
    let response = invoker.invoke(flow, &request).await?;
    encode_response(flow.name(), flow.context(), &response)
}

async fn image_json<I, O>(
    invoker: &FlowInvoker,
    flow: &ImageFlow<I, O>,
    input: JsonValue,
) -> Result<JsonValue, FlowError>
where
    I: DeserializeOwned + Serialize + Schema + Sync,
    O: Serialize + Schema,
{
    let request: I = decode_request(flow.name(), flow.context(), input)?;
    let response = invoker.invoke_image(flow, &request).await?;
    encode_response(flow.name(), flow.context(), &response)
}

fn decode_request<I: DeserializeOwned>(
    name: &str,
    context: &str,
    input: JsonValue,
) -> Result<I, FlowError> {
    serde_json::from_value(input).map_err(|e| {
        tracing::error!(flow = name, error = %e, "Flow request did not match its schema");
        FlowError::new(
            name,
            ErrorCategory::InvalidInput,
            format!("{} failed: Invalid request: {}", context, e),
        )
    })
}

fn encode_response<O: Serialize>(
    name: &str,
    context: &str,
    response: &O,
) -> Result<JsonValue, FlowError> {
    serde_json::to_value(response).map_err(|e| {
        classify(name, context, JsonError::serialize("response", e).into())
    })
}
