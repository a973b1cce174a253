//! Character-centred flows: quotes, backstories, names and dialogue.

use scriptura_core::{
    CharacterProfile, Schema, StoryDetails, require_items, require_range, require_text,
};
use scriptura_error::SchemaError;
use serde::{Deserialize, Serialize};

use crate::{OutputFormat, PromptFlow};

const WRITER_SYSTEM: &str = "You are a collaborative fiction writer. Stay true to the details \
the author gives you and never break character to comment on the request.";

// ─── character_quote ──────────────────────────────────────────────────────────

/// Request for a single in-character line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterQuoteRequest {
    /// Who is speaking
    pub character: CharacterProfile,
    /// What is happening when they speak
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
}

impl Schema for CharacterQuoteRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.character.validate()
    }
}

/// A memorable line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterQuote {
    /// The quote, without surrounding quotation marks
    pub quote: String,
}

impl Schema for CharacterQuote {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("quote", &self.quote)
    }
}

/// One memorable line of dialogue for a character.
pub fn character_quote() -> PromptFlow<CharacterQuoteRequest, CharacterQuote> {
    PromptFlow::new(
        "character_quote",
        "Quote generation",
        "Write one short, memorable line that this character would say.\n\
\n\
Character: {{character.description}}\n\
{{#if character.name}}Name: {{character.name}}\n{{/if}}\
{{#if character.personality}}Personality: {{character.personality}}\n{{/if}}\
{{#if character.role}}Role in the story: {{character.role}}\n{{/if}}\
{{#if situation}}Situation: {{situation}}\n{{/if}}\
\n\
Respond as JSON: {\"quote\": \"...\"}",
        OutputFormat::Json,
    )
    .with_system(WRITER_SYSTEM)
}

// ─── character_backstory ──────────────────────────────────────────────────────

/// Request for a character history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterBackstoryRequest {
    /// The character to flesh out
    pub character: CharacterProfile,
    /// The story they belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<StoryDetails>,
}

impl Schema for CharacterBackstoryRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.character.validate()?;
        if let Some(story) = &self.story {
            story.validate()?;
        }
        Ok(())
    }
}

/// A character history in prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterBackstory {
    /// Two or three paragraphs of history
    pub backstory: String,
}

impl Schema for CharacterBackstory {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("backstory", &self.backstory)
    }
}

/// A few paragraphs of history for a character.
pub fn character_backstory() -> PromptFlow<CharacterBackstoryRequest, CharacterBackstory> {
    PromptFlow::new(
        "character_backstory",
        "Backstory generation",
        "Write a backstory of two or three paragraphs for this character. Explain where they \
come from and what shaped them, and leave one thread unresolved for the story to pick up.\n\
\n\
Character: {{character.description}}\n\
{{#if character.name}}Name: {{character.name}}\n{{/if}}\
{{#if character.personality}}Personality: {{character.personality}}\n{{/if}}\
{{#if story}}\
Story genre: {{story.genre}}\n\
Story setting: {{story.setting}}\n\
{{/if}}\
\n\
Reply with the backstory only, as plain prose.",
        OutputFormat::Text { field: "backstory" },
    )
    .with_system(WRITER_SYSTEM)
}

// ─── character_names ──────────────────────────────────────────────────────────

fn default_name_count() -> u8 {
    5
}

/// Request for name suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterNamesRequest {
    /// Genre the names must fit
    pub genre: String,
    /// Culture or language to draw on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    /// How many names, 1 to 10
    #[serde(default = "default_name_count")]
    pub count: u8,
}

impl Schema for CharacterNamesRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("genre", &self.genre)?;
        require_range("count", self.count, 1, 10)
    }
}

/// Suggested names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterNames {
    /// Names, most fitting first
    pub names: Vec<String>,
}

impl Schema for CharacterNames {
    fn validate(&self) -> Result<(), SchemaError> {
        require_items("names", &self.names)
    }
}

/// Character name suggestions for a genre.
pub fn character_names() -> PromptFlow<CharacterNamesRequest, CharacterNames> {
    PromptFlow::new(
        "character_names",
        "Name generation",
        "Suggest {{count}} distinct character names for a {{genre}} story.\
{{#if culture}} Draw on {{culture}} naming traditions.{{/if}} \
Avoid famous fictional characters.\n\
\n\
Respond as JSON: {\"names\": [\"...\"]}",
        OutputFormat::Json,
    )
}

// ─── dialogue ─────────────────────────────────────────────────────────────────

/// Request for a short exchange between two characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueRequest {
    /// Who opens the exchange
    pub speaker: CharacterProfile,
    /// Who answers
    pub listener: CharacterProfile,
    /// What the conversation is about
    pub situation: String,
}

impl Schema for DialogueRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("speaker.description", &self.speaker.description)?;
        require_text("listener.description", &self.listener.description)?;
        require_text("situation", &self.situation)
    }
}

/// Alternating lines of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    /// Lines, each prefixed with the speaker's name
    pub lines: Vec<String>,
}

impl Schema for Dialogue {
    fn validate(&self) -> Result<(), SchemaError> {
        require_items("lines", &self.lines)
    }
}

/// A short exchange between two characters.
pub fn dialogue() -> PromptFlow<DialogueRequest, Dialogue> {
    PromptFlow::new(
        "dialogue",
        "Dialogue generation",
        "Write a short exchange of four to eight lines between two characters.\n\
\n\
First speaker: {{speaker.description}}\
{{#if speaker.name}} (named {{speaker.name}}){{/if}}\n\
Second speaker: {{listener.description}}\
{{#if listener.name}} (named {{listener.name}}){{/if}}\n\
Situation: {{situation}}\n\
\n\
Prefix every line with the speaker's name and a colon.\n\
Respond as JSON: {\"lines\": [\"Name: ...\"]}",
        OutputFormat::Json,
    )
    .with_system(WRITER_SYSTEM)
    .with_temperature(1.0)
}
