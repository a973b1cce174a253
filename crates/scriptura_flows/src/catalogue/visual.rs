//! Visual flows: prompts for illustrators and generated images.

use scriptura_core::{AspectRatio, CharacterProfile, Schema, require_text};
use scriptura_error::{SchemaError, SchemaErrorKind};
use serde::{Deserialize, Serialize};

use crate::{ImageFlow, OutputFormat, PromptFlow};

/// Generated images must come back inline.
fn require_data_uri(field: &str, value: &str) -> Result<(), SchemaError> {
    require_text(field, value)?;
    if !value.starts_with("data:image/") {
        return Err(SchemaError::new(SchemaErrorKind::OutOfRange {
            field: field.to_string(),
            reason: "expected an inline data:image URI".to_string(),
        }));
    }
    Ok(())
}

// ─── image_prompt ─────────────────────────────────────────────────────────────

/// Request to turn a scene into an image-generation prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePromptRequest {
    /// The scene in story terms
    pub scene: String,
    /// Art style, e.g. "watercolour"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Schema for ImagePromptRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("scene", &self.scene)
    }
}

/// A prompt ready for a diffusion model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePrompt {
    /// Comma-separated visual description
    pub prompt: String,
}

impl Schema for ImagePrompt {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("prompt", &self.prompt)
    }
}

/// Rewrite a story scene as a concise diffusion prompt.
pub fn image_prompt() -> PromptFlow<ImagePromptRequest, ImagePrompt> {
    PromptFlow::new(
        "image_prompt",
        "Image prompt generation",
        "Rewrite this scene as a prompt for an image generator: a single line of \
comma-separated visual details (subject, setting, lighting, composition), no story \
exposition, under 60 words.\n\
\n\
Scene: {{scene}}\n\
{{#if style}}Art style: {{style}}\n{{/if}}\
\n\
Respond as JSON: {\"prompt\": \"...\"}",
        OutputFormat::Json,
    )
}

// ─── character_portrait ───────────────────────────────────────────────────────

/// Request for a character portrait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPortraitRequest {
    /// Who to paint
    pub character: CharacterProfile,
    /// Art style, e.g. "oil painting"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Schema for CharacterPortraitRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.character.validate()
    }
}

/// A generated portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPortrait {
    /// `data:image/...;base64,...`
    pub image_url: String,
}

impl Schema for CharacterPortrait {
    fn validate(&self) -> Result<(), SchemaError> {
        require_data_uri("image_url", &self.image_url)
    }
}

/// A portrait-orientation image of a character.
pub fn character_portrait() -> ImageFlow<CharacterPortraitRequest, CharacterPortrait> {
    ImageFlow::new(
        "character_portrait",
        "Portrait generation",
        "Portrait of {{character.description}}\
{{#if character.personality}}, expression suggesting {{character.personality}}{{/if}}, \
head and shoulders, detailed face, soft rim lighting\
{{#if style}}, {{style}}{{/if}}",
        |_: &CharacterPortraitRequest| AspectRatio::Portrait,
        |image_url: String| CharacterPortrait { image_url },
    )
}

// ─── scenario_visual ──────────────────────────────────────────────────────────

/// Request for an illustration of a story moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVisualRequest {
    /// What the image shows
    pub scenario: String,
    /// A character to feature, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
    /// Image shape
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl Schema for ScenarioVisualRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("scenario", &self.scenario)
    }
}

/// A generated scene illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioVisual {
    /// `data:image/...;base64,...`
    pub url: String,
}

impl Schema for ScenarioVisual {
    fn validate(&self) -> Result<(), SchemaError> {
        require_data_uri("url", &self.url)
    }
}

/// An illustration of a story moment in the requested aspect ratio.
pub fn scenario_visual() -> ImageFlow<ScenarioVisualRequest, ScenarioVisual> {
    ImageFlow::new(
        "scenario_visual",
        "Scenario visual generation",
        "Cinematic illustration of {{scenario}}\
{{#if character_name}}, featuring {{character_name}}{{/if}}, \
atmospheric lighting, rich detail, storybook composition",
        |request: &ScenarioVisualRequest| request.aspect_ratio,
        |url: String| ScenarioVisual { url },
    )
}
