//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scriptura binary.

mod commands;
mod flows;
mod image;
mod run;

pub use commands::{Cli, Commands};
pub use flows::list_flows;
pub use image::{handle_image, write_data_uri};
pub use run::{RequestSource, handle_run, read_request, resolve_flow, run_flow};
