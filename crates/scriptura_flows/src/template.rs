//! Prompt template rendering.
//!
//! Templates are plain text with two constructs, both resolved against the
//! serialized flow request:
//!
//! - `{{path}}` inserts the value at a dotted path (`character.name`)
//! - `{{#if path}} ... {{/if}}` keeps the enclosed text only when the value
//!   at `path` is present, non-null and non-empty
//!
//! Conditionals do not nest.

use regex::Regex;
use scriptura_error::{TemplateError, TemplateErrorKind};
use serde_json::Value as JsonValue;
use std::sync::LazyLock;

static CONDITIONAL: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{#if\s+([\w.]+)\s*\}\}(.*?)\{\{/if\}\}"));
static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}"));

/// Render a template against request data.
///
/// # Errors
///
/// Returns [`TemplateErrorKind::MissingValue`] when a placeholder points
/// at a missing or null value, and [`TemplateErrorKind::Malformed`] for
/// unbalanced conditionals.
///
/// # Examples
///
/// ```
/// use scriptura_flows::render_template;
/// use serde_json::json;
///
/// let data = json!({ "character": { "name": "Maren" }, "mood": null });
/// let prompt = render_template(
///     "Write a line{{#if character.name}} for {{character.name}}{{/if}}.{{#if mood}} Mood: {{mood}}.{{/if}}",
///     &data,
/// ).unwrap();
/// assert_eq!(prompt, "Write a line for Maren.");
/// ```
pub fn render_template(template: &str, data: &JsonValue) -> Result<String, TemplateError> {
    let conditional = compiled(&CONDITIONAL)?;
    let placeholder = compiled(&PLACEHOLDER)?;

    let mut kept = String::with_capacity(template.len());
    let mut last = 0;
    for cap in conditional.captures_iter(template) {
        let (Some(whole), Some(path), Some(body)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            continue;
        };
        kept.push_str(&template[last..whole.start()]);
        if is_truthy(lookup(data, path.as_str())) {
            kept.push_str(body.as_str());
        }
        last = whole.end();
    }
    kept.push_str(&template[last..]);

    if kept.contains("{{#if") || kept.contains("{{/if}}") {
        return Err(TemplateError::new(TemplateErrorKind::Malformed(
            "unbalanced {{#if}} block".to_string(),
        )));
    }

    let mut result = String::with_capacity(kept.len());
    let mut last = 0;
    for cap in placeholder.captures_iter(&kept) {
        let (Some(whole), Some(path)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let path = path.as_str();
        let value = lookup(data, path)
            .filter(|value| !value.is_null())
            .ok_or_else(|| TemplateError::new(TemplateErrorKind::MissingValue(path.to_string())))?;

        result.push_str(&kept[last..whole.start()]);
        result.push_str(&to_prompt_text(value));
        last = whole.end();
    }
    result.push_str(&kept[last..]);

    Ok(result)
}

/// Patterns are compiled once per process.
fn compiled(
    pattern: &'static LazyLock<Result<Regex, regex::Error>>,
) -> Result<&'static Regex, TemplateError> {
    pattern.as_ref().map_err(|e| {
        TemplateError::new(TemplateErrorKind::Malformed(format!(
            "Invalid template regex: {}",
            e
        )))
    })
}

/// Navigate a dotted path; numeric segments index arrays.
fn lookup<'a>(data: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            other => other.get(segment)?,
        };
    }
    Some(current)
}

fn is_truthy(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::String(s)) => !s.trim().is_empty(),
        Some(JsonValue::Array(items)) => !items.is_empty(),
        Some(JsonValue::Object(map)) => !map.is_empty(),
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(_)) => true,
    }
}

fn to_prompt_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(to_prompt_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn is_scalar(value: &JsonValue) -> bool {
    matches!(
        value,
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Bool(_)
    )
}
