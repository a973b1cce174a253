//! Configuration for Scriptura.
//!
//! Settings are layered from bundled defaults, user files and an optional
//! explicit path:
//! ```ignore
//! use scriptura_config::ScripturaConfig;
//! let config = ScripturaConfig::load()?;
//! ```

mod config;

pub use config::{
    FlowSettings, ImageSettings, ResolvedFlowSettings, ScripturaConfig, TextSettings,
};
