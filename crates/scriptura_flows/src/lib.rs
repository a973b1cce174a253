//! Prompt flows for Scriptura.
//!
//! A flow turns a typed request into a typed response through one call to
//! a generative model:
//!
//! 1. validate the request against its [`Schema`](scriptura_core::Schema)
//! 2. render the flow's prompt template from the request fields
//! 3. send one request to the text model (or image generator)
//! 4. parse and validate the reply
//!
//! Any failure along the way becomes a single classified
//! [`FlowError`](scriptura_error::FlowError).
//!
//! # Features
//!
//! - **Flows as data**: [`PromptFlow`] and [`ImageFlow`] hold a template and
//!   output format; the [`catalogue`] defines the built-in ones
//! - **Templates**: `{{path}}` placeholders and `{{#if path}}` fragments
//! - **Robust JSON extraction**: fenced blocks and stray prose are tolerated
//! - **Pluggable backends**: any [`ScripturaDriver`](scriptura_interface::ScripturaDriver)
//!   and [`ImageGenerator`](scriptura_interface::ImageGenerator)
//!
//! # Example
//!
//! ```no_run
//! use scriptura_config::ScripturaConfig;
//! use scriptura_core::StoryDetails;
//! use scriptura_flows::{FlowInvoker, catalogue};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let invoker = FlowInvoker::from_env(ScripturaConfig::load()?);
//! let request = catalogue::StoryPremiseRequest {
//!     story: StoryDetails::new("gothic mystery", "a drowned village in 1890s Cornwall"),
//! };
//! let premise = invoker.invoke(&catalogue::story_premise(), &request).await?;
//! println!("{}: {}", premise.title, premise.premise);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalogue;
mod extraction;
mod flow;
mod invoker;
mod template;

pub use catalogue::FlowKind;
pub use extraction::{extract_json, parse_json};
pub use flow::{ImageFlow, OutputFormat, PromptFlow};
pub use invoker::FlowInvoker;
pub use template::render_template;
