//! Story and character descriptors shared by the flows.

use crate::{Schema, require_text};
use scriptura_error::SchemaError;
use serde::{Deserialize, Serialize};

/// A character as the author describes them.
///
/// # Examples
///
/// ```
/// use scriptura_core::{CharacterProfile, Schema};
///
/// let character = CharacterProfile::new("A weary lighthouse keeper").with_name("Maren");
/// assert!(character.validate().is_ok());
/// assert_eq!(character.display_name(), "Maren");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Character name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description (appearance, history)
    pub description: String,
    /// Personality traits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    /// Role in the story (protagonist, mentor, rival...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl CharacterProfile {
    /// Describe a character with no optional details.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: description.into(),
            personality: None,
            role: None,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the personality.
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    /// Set the story role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The name, or a neutral stand-in when none was given.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("the character")
    }
}

impl Schema for CharacterProfile {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("character.description", &self.description)
    }
}

/// The attributes of a story being written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryDetails {
    /// Working title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Genre (fantasy, noir, ...)
    pub genre: String,
    /// Where and when the story takes place
    pub setting: String,
    /// Desired tone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Premise, if already decided
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premise: Option<String>,
}

impl StoryDetails {
    /// Describe a story by genre and setting.
    pub fn new(genre: impl Into<String>, setting: impl Into<String>) -> Self {
        Self {
            title: None,
            genre: genre.into(),
            setting: setting.into(),
            tone: None,
            premise: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }

    /// Set the premise.
    pub fn with_premise(mut self, premise: impl Into<String>) -> Self {
        self.premise = Some(premise.into());
        self
    }
}

impl Schema for StoryDetails {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("story.genre", &self.genre)?;
        require_text("story.setting", &self.setting)
    }
}

/// Image orientation for generated visuals.
///
/// # Examples
///
/// ```
/// use scriptura_core::AspectRatio;
///
/// assert_eq!(AspectRatio::Portrait.dimensions(), (720, 1280));
/// assert_eq!("landscape".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AspectRatio {
    /// 9:16, phone-screen scenes
    #[default]
    Portrait,
    /// 16:9, cinematic scenes
    Landscape,
    /// 1:1
    Square,
}

impl AspectRatio {
    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Portrait => (720, 1280),
            AspectRatio::Landscape => (1280, 720),
            AspectRatio::Square => (1024, 1024),
        }
    }
}
