//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scriptura - story-generation prompt flows
#[derive(Parser, Debug)]
#[command(name = "scriptura")]
#[command(about = "Run story-generation prompt flows against hosted text and image models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in flows
    Flows,

    /// Run a flow on a JSON request and print the JSON response
    Run {
        /// Flow name, as listed by `scriptura flows`
        flow: String,

        /// Request file, or `-` to read standard input
        #[arg(long, conflicts_with = "json", required_unless_present = "json")]
        input: Option<PathBuf>,

        /// Request as inline JSON
        #[arg(long)]
        json: Option<String>,
    },

    /// Generate an image directly from a prompt
    Image {
        /// What to draw
        #[arg(long)]
        prompt: String,

        /// Image width in pixels
        #[arg(long, default_value_t = 720)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 1280)]
        height: u32,

        /// Write the decoded image here instead of printing the data URI
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
