//! Story-level flows: premise, opening, continuation, twists and summaries.

use scriptura_core::{
    CharacterProfile, Schema, StoryDetails, require_items, require_range, require_text,
};
use scriptura_error::SchemaError;
use serde::{Deserialize, Serialize};

use crate::{OutputFormat, PromptFlow};

const NARRATOR_SYSTEM: &str = "You are the narrator of an interactive story. Write vivid, \
concrete prose in the second person and keep each passage under 250 words.";

/// A passage of the story plus the choices offered to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPassage {
    /// Narrative text
    pub passage: String,
    /// Two to four things the reader may do next
    pub choices: Vec<String>,
}

impl Schema for StoryPassage {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("passage", &self.passage)?;
        require_items("choices", &self.choices)
    }
}

// ─── story_premise ────────────────────────────────────────────────────────────

/// Request for a story premise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPremiseRequest {
    /// Genre, setting and tone to build on
    pub story: StoryDetails,
}

impl Schema for StoryPremiseRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.story.validate()
    }
}

/// A title and the hook of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPremise {
    /// Working title
    pub title: String,
    /// One-paragraph premise
    pub premise: String,
}

impl Schema for StoryPremise {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("title", &self.title)?;
        require_text("premise", &self.premise)
    }
}

/// A title and one-paragraph premise.
pub fn story_premise() -> PromptFlow<StoryPremiseRequest, StoryPremise> {
    PromptFlow::new(
        "story_premise",
        "Premise generation",
        "Invent a premise for an interactive story.\n\
\n\
Genre: {{story.genre}}\n\
Setting: {{story.setting}}\n\
{{#if story.tone}}Tone: {{story.tone}}\n{{/if}}\
{{#if story.title}}Keep the title \"{{story.title}}\".\n{{/if}}\
\n\
Respond as JSON: {\"title\": \"...\", \"premise\": \"...\"}",
        OutputFormat::Json,
    )
}

// ─── story_opening ────────────────────────────────────────────────────────────

/// Request for the first passage of a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOpeningRequest {
    /// The story being started
    pub story: StoryDetails,
    /// Whom the reader plays
    pub protagonist: CharacterProfile,
}

impl Schema for StoryOpeningRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.story.validate()?;
        self.protagonist.validate()
    }
}

/// The opening passage and first choices.
pub fn story_opening() -> PromptFlow<StoryOpeningRequest, StoryPassage> {
    PromptFlow::new(
        "story_opening",
        "Story opening",
        "Write the opening passage of the story and offer the reader two to four choices.\n\
\n\
Genre: {{story.genre}}\n\
Setting: {{story.setting}}\n\
{{#if story.tone}}Tone: {{story.tone}}\n{{/if}}\
{{#if story.premise}}Premise: {{story.premise}}\n{{/if}}\
The reader plays: {{protagonist.description}}\
{{#if protagonist.name}}, named {{protagonist.name}}{{/if}}\n\
\n\
Respond as JSON: {\"passage\": \"...\", \"choices\": [\"...\"]}",
        OutputFormat::Json,
    )
    .with_system(NARRATOR_SYSTEM)
}

// ─── story_continuation ───────────────────────────────────────────────────────

/// Request for the next passage after a reader's choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryContinuationRequest {
    /// The story being told
    pub story: StoryDetails,
    /// The passage the reader just read
    pub previous_passage: String,
    /// The choice the reader made
    pub choice: String,
}

impl Schema for StoryContinuationRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.story.validate()?;
        require_text("previous_passage", &self.previous_passage)?;
        require_text("choice", &self.choice)
    }
}

/// The next passage, following the reader's choice.
pub fn story_continuation() -> PromptFlow<StoryContinuationRequest, StoryPassage> {
    PromptFlow::new(
        "story_continuation",
        "Story continuation",
        "Continue the story from the reader's choice, then offer two to four new choices.\n\
\n\
Genre: {{story.genre}}\n\
Setting: {{story.setting}}\n\
{{#if story.tone}}Tone: {{story.tone}}\n{{/if}}\
\n\
Previous passage:\n\
{{previous_passage}}\n\
\n\
The reader chose: {{choice}}\n\
\n\
Respond as JSON: {\"passage\": \"...\", \"choices\": [\"...\"]}",
        OutputFormat::Json,
    )
    .with_system(NARRATOR_SYSTEM)
}

// ─── plot_twist ───────────────────────────────────────────────────────────────

/// Request for a twist on the current plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotTwistRequest {
    /// The story being told
    pub story: StoryDetails,
    /// What has happened so far
    pub current_plot: String,
}

impl Schema for PlotTwistRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        self.story.validate()?;
        require_text("current_plot", &self.current_plot)
    }
}

/// An unexpected turn of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotTwist {
    /// The twist in two or three sentences
    pub twist: String,
}

impl Schema for PlotTwist {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("twist", &self.twist)
    }
}

/// A surprising but fair twist on the plot so far.
pub fn plot_twist() -> PromptFlow<PlotTwistRequest, PlotTwist> {
    PromptFlow::new(
        "plot_twist",
        "Plot twist generation",
        "Propose one plot twist that is surprising yet consistent with what the reader \
already knows.\n\
\n\
Genre: {{story.genre}}\n\
Setting: {{story.setting}}\n\
Plot so far: {{current_plot}}\n\
\n\
Respond as JSON: {\"twist\": \"...\"}",
        OutputFormat::Json,
    )
    .with_temperature(1.0)
}

// ─── story_summary ────────────────────────────────────────────────────────────

fn default_max_sentences() -> u8 {
    3
}

/// Request to condense story text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySummaryRequest {
    /// Text to summarise
    pub text: String,
    /// Upper bound on summary length, 1 to 10 sentences
    #[serde(default = "default_max_sentences")]
    pub max_sentences: u8,
}

impl Schema for StorySummaryRequest {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("text", &self.text)?;
        require_range("max_sentences", self.max_sentences, 1, 10)
    }
}

/// A condensed retelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySummary {
    /// Summary prose
    pub summary: String,
}

impl Schema for StorySummary {
    fn validate(&self) -> Result<(), SchemaError> {
        require_text("summary", &self.summary)
    }
}

/// A summary of story text in at most `max_sentences` sentences.
pub fn story_summary() -> PromptFlow<StorySummaryRequest, StorySummary> {
    PromptFlow::new(
        "story_summary",
        "Story summary",
        "Summarise the following story text in at most {{max_sentences}} sentences. \
Keep names and key events; drop description.\n\
\n\
{{text}}",
        OutputFormat::Text { field: "summary" },
    )
}
