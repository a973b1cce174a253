//! Direct image generation command handler.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scriptura_config::ScripturaConfig;
use scriptura_error::{ConfigError, ConfigErrorKind, ImageError, ImageErrorKind, ScripturaResult};
use scriptura_models::GetimgClient;
use std::path::Path;
use tracing::info;

/// Handle `scriptura image`.
///
/// Returns the data URI, or a short confirmation when the image was
/// written to `out`.
pub async fn handle_image(
    config: &ScripturaConfig,
    prompt: &str,
    width: u32,
    height: u32,
    out: Option<&Path>,
) -> ScripturaResult<String> {
    let client = GetimgClient::from_env(config.image.clone())?;
    let uri = client.generate_data_uri(prompt, width, height).await?;

    match out {
        Some(path) => {
            let bytes = write_data_uri(&uri, path)?;
            info!(path = %path.display(), bytes, "Image written");
            Ok(format!("Wrote {} bytes to {}", bytes, path.display()))
        }
        None => Ok(uri),
    }
}

/// Decode a base64 data URI and write the raw image to `path`.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Fails on anything other than a base64 data URI, or if the file cannot
/// be written.
pub fn write_data_uri(uri: &str, path: &Path) -> ScripturaResult<usize> {
    let payload = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| {
            ImageError::new(ImageErrorKind::InvalidResponse(
                "expected a base64 data URI".to_string(),
            ))
        })?;

    let bytes = STANDARD.decode(payload).map_err(|e| {
        ImageError::new(ImageErrorKind::InvalidResponse(format!(
            "image payload is not valid base64: {}",
            e
        )))
    })?;

    std::fs::write(path, &bytes).map_err(|e| {
        ConfigError::new(ConfigErrorKind::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;

    Ok(bytes.len())
}
