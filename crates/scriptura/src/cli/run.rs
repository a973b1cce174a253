//! Flow execution command handler.

use scriptura_config::ScripturaConfig;
use scriptura_error::{
    ConfigError, ConfigErrorKind, ErrorCategory, FlowError, JsonError, ScripturaResult,
};
use scriptura_flows::{FlowInvoker, FlowKind};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Where the JSON request for `run` comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Given on the command line
    Inline(String),
    /// Piped in
    Stdin,
    /// Read from a file
    File(PathBuf),
}

impl RequestSource {
    /// Pick the source from the `--input` and `--json` arguments.
    ///
    /// Inline JSON wins; an input path of `-` means standard input.
    pub fn from_args(input: Option<&Path>, json: Option<&str>) -> Self {
        match (json, input) {
            (Some(json), _) => RequestSource::Inline(json.to_string()),
            (None, Some(path)) if path == Path::new("-") => RequestSource::Stdin,
            (None, Some(path)) => RequestSource::File(path.to_path_buf()),
            (None, None) => RequestSource::Stdin,
        }
    }
}

/// Read and parse the request JSON.
///
/// # Errors
///
/// Fails if the source cannot be read or does not hold valid JSON.
pub fn read_request(source: &RequestSource) -> ScripturaResult<JsonValue> {
    let text = match source {
        RequestSource::Inline(json) => json.clone(),
        RequestSource::Stdin => std::io::read_to_string(std::io::stdin()).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Io {
                path: "<stdin>".to_string(),
                message: e.to_string(),
            })
        })?,
        RequestSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?,
    };

    Ok(serde_json::from_str(&text).map_err(|e| JsonError::parse("flow request", e))?)
}

/// Look up a flow by its catalogue name.
///
/// # Errors
///
/// Unknown names fail with [`ErrorCategory::InvalidInput`].
pub fn resolve_flow(flow: &str) -> ScripturaResult<FlowKind> {
    Ok(flow.parse().map_err(|_| {
        FlowError::new(
            flow,
            ErrorCategory::InvalidInput,
            format!("Unknown flow '{}'. Run `scriptura flows` to list them.", flow),
        )
    })?)
}

/// Run the named flow on a JSON request.
///
/// # Errors
///
/// Unknown flow names fail with [`ErrorCategory::InvalidInput`]; anything
/// else is the flow's own classified failure.
#[instrument(skip(invoker, request))]
pub async fn run_flow(
    invoker: &FlowInvoker,
    flow: &str,
    request: JsonValue,
) -> ScripturaResult<JsonValue> {
    let kind = resolve_flow(flow)?;
    info!(flow = kind.name(), "Running flow");
    Ok(kind.invoke_json(invoker, request).await?)
}

/// Handle `scriptura run`: check the flow name, read the request, run the
/// flow against the configured providers and return the pretty-printed
/// response.
pub async fn handle_run(
    config: ScripturaConfig,
    flow: &str,
    source: &RequestSource,
) -> ScripturaResult<String> {
    let kind = resolve_flow(flow)?;
    let request = read_request(source)?;
    let invoker = FlowInvoker::from_env(config);

    info!(flow = kind.name(), "Running flow");
    let response = kind.invoke_json(&invoker, request).await?;

    Ok(serde_json::to_string_pretty(&response)
        .map_err(|e| JsonError::serialize("flow response", e))?)
}
