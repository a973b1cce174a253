//! Scriptura - prompt flows for interactive storytelling
//!
//! Scriptura runs small, single-purpose generation tasks ("flows") for an
//! interactive-fiction app: character quotes and backstories, story
//! openings and continuations, plot twists, summaries, and generated
//! portraits and scene illustrations. Each flow renders a prompt from a
//! typed request, calls a hosted model once, validates what comes back,
//! and turns every failure into a [`FlowError`] with a message that is
//! safe to show to users.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scriptura::{CharacterProfile, FlowInvoker, ScripturaConfig, catalogue};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let invoker = FlowInvoker::from_env(ScripturaConfig::load()?);
//!
//!     let request = catalogue::CharacterQuoteRequest {
//!         character: CharacterProfile::new("A retired cartographer who distrusts maps"),
//!         situation: None,
//!     };
//!     let quote = invoker.invoke(&catalogue::character_quote(), &request).await?;
//!     println!("{}", quote.quote);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Scriptura is organized as a workspace with focused crates:
//!
//! - `scriptura_error` - Error kinds and failure classification
//! - `scriptura_core` - Requests, responses, story descriptors, tracing setup
//! - `scriptura_interface` - `ScripturaDriver` and `ImageGenerator` traits
//! - `scriptura_config` - Layered TOML configuration
//! - `scriptura_models` - Gemini and getimg.ai clients
//! - `scriptura_flows` - Templates, the flow invoker and the flow catalogue
//!
//! This crate (`scriptura`) re-exports everything for convenience and
//! hosts the `scriptura` command-line tool.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;

pub use scriptura_config::*;
pub use scriptura_core::*;
pub use scriptura_error::*;
pub use scriptura_interface::*;
pub use scriptura_models::*;

pub use scriptura_flows::{
    FlowInvoker, FlowKind, ImageFlow, OutputFormat, PromptFlow, catalogue, extract_json,
    parse_json, render_template,
};
