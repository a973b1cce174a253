//! Configuration structures for text models, image generation and flows.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from scriptura.toml)
//! - User overrides (~/.config/scriptura/scriptura.toml, then ./scriptura.toml)
//! - An optional explicit file with the highest precedence
//!
//! API keys never live here; clients read them from the environment.

use scriptura_error::{ConfigError, ConfigErrorKind, ScripturaError, ScripturaResult};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../scriptura.toml");

/// Defaults applied to every text flow.
///
/// ```toml
/// [text]
/// default_model = "gemini-2.0-flash"
/// temperature = 0.9
/// max_tokens = 2048
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextSettings {
    /// Model used when a flow has no override
    pub default_model: String,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Output token cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Fixed parameters sent to the diffusion API.
///
/// ```toml
/// [image]
/// endpoint = "https://api.getimg.ai/v1/stable-diffusion-xl/text-to-image"
/// model = "stable-diffusion-xl-v1-0"
/// negative_prompt = "blurry, low quality"
/// steps = 25
/// guidance = 7.5
/// output_format = "jpeg"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageSettings {
    /// Text-to-image endpoint URL
    pub endpoint: String,
    /// Diffusion model name
    pub model: String,
    /// What the image must not contain
    pub negative_prompt: String,
    /// Diffusion steps
    pub steps: u32,
    /// Guidance scale
    pub guidance: f32,
    /// Encoded image format (`jpeg`, `png`)
    pub output_format: String,
}

impl ImageSettings {
    /// MIME type matching `output_format`.
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.output_format.to_lowercase())
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.getimg.ai/v1/stable-diffusion-xl/text-to-image".to_string(),
            model: "stable-diffusion-xl-v1-0".to_string(),
            negative_prompt: "blurry, low quality, distorted, deformed, watermark, text"
                .to_string(),
            steps: 25,
            guidance: 7.5,
            output_format: "jpeg".to_string(),
        }
    }
}

/// Per-flow overrides. Unset fields fall back to [`TextSettings`].
///
/// ```toml
/// [flows.story_summary]
/// model = "gemini-2.5-flash"
/// temperature = 0.3
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct FlowSettings {
    /// Model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Output token cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Settings for one flow after overrides are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFlowSettings {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_tokens: Option<u32>,
}

/// Top-level Scriptura configuration.
///
/// # Example
///
/// ```no_run
/// use scriptura_config::{FlowSettings, ScripturaConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScripturaConfig::load()?;
/// let quote = config.flow("character_quote", &FlowSettings::default());
/// println!("Quote model: {}", quote.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScripturaConfig {
    /// Text model defaults
    pub text: TextSettings,

    /// Diffusion API parameters
    #[serde(default)]
    pub image: ImageSettings,

    /// Per-flow overrides keyed by flow name
    #[serde(default)]
    pub flows: HashMap<String, FlowSettings>,
}

impl ScripturaConfig {
    /// Parse the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> ScripturaResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ScripturaResult<Self> {
        debug!("Loading configuration from file");

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ScripturaResult<Self> {
        Self::load_with(None)
    }

    /// Like [`load`](Self::load), with an optional explicit file on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or any source is malformed.
    #[instrument(skip(explicit))]
    pub fn load_with(explicit: Option<&Path>) -> ScripturaResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scriptura/scriptura.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("scriptura").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> ScripturaResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ScripturaError::from(ConfigError::new(ConfigErrorKind::Build(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScripturaError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })
    }

    /// Effective settings for a flow.
    ///
    /// Precedence per setting: `[flows.<name>]`, then the flow's own
    /// `defaults`, then `[text]`.
    pub fn flow(&self, name: &str, defaults: &FlowSettings) -> ResolvedFlowSettings {
        let overrides = self.flows.get(name);
        ResolvedFlowSettings {
            model: overrides
                .and_then(|flow| flow.model.clone())
                .or_else(|| defaults.model.clone())
                .unwrap_or_else(|| self.text.default_model.clone()),
            temperature: overrides
                .and_then(|flow| flow.temperature)
                .or(defaults.temperature)
                .or(self.text.temperature),
            max_tokens: overrides
                .and_then(|flow| flow.max_tokens)
                .or(defaults.max_tokens)
                .or(self.text.max_tokens),
        }
    }
}
