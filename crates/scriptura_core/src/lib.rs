//! Core data types for the Scriptura story generation library.
//!
//! This crate provides the transient value types passed between flows,
//! model drivers and image generators, plus the [`Schema`] trait used to
//! validate them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image;
mod message;
mod output;
mod request;
mod role;
mod schema;
mod story;
mod telemetry;

pub use image::{ImageRequest, ImageRequestBuilder, ImageResponse};
pub use message::Message;
pub use output::Output;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, ResponseFormat};
pub use role::Role;
pub use schema::{Schema, require_items, require_range, require_text};
pub use story::{AspectRatio, CharacterProfile, StoryDetails};
pub use telemetry::{DEFAULT_LOG_FILTER, init_tracing};
