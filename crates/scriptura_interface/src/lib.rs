//! Trait definitions for the Scriptura story generation library.
//!
//! Flows only ever talk to a text model through [`ScripturaDriver`] and to
//! an image service through [`ImageGenerator`], so either side can be
//! swapped for a test double.

mod traits;

pub use traits::{ImageGenerator, ScripturaDriver};
