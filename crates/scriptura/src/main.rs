//! Scriptura CLI binary.
//!
//! This binary provides command-line access to Scriptura's flows:
//! - List the built-in flows
//! - Run a flow on a JSON request
//! - Generate an image straight from a prompt

use clap::Parser;
use scriptura::cli::{Cli, Commands, RequestSource, handle_image, handle_run, list_flows};
use scriptura::{ScripturaConfig, ScripturaResult, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Keys may live in a .env file next to the project
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if let Err(e) = execute(cli).await {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e.detail());
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(cli: Cli) -> ScripturaResult<()> {
    match cli.command {
        Commands::Flows => {
            print!("{}", list_flows());
        }

        Commands::Run { flow, input, json } => {
            let config = ScripturaConfig::load_with(cli.config.as_deref())?;
            let source = RequestSource::from_args(input.as_deref(), json.as_deref());
            let output = handle_run(config, &flow, &source).await?;
            println!("{}", output);
        }

        Commands::Image {
            prompt,
            width,
            height,
            out,
        } => {
            let config = ScripturaConfig::load_with(cli.config.as_deref())?;
            let output = handle_image(&config, &prompt, width, height, out.as_deref()).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
