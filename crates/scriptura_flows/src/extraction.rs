//! Utilities for extracting structured data from model replies.
//!
//! Even in JSON mode, replies sometimes arrive wrapped in markdown fences
//! or with a sentence of preamble. Extraction tries, in order:
//! 1. A fenced ```json block (or an unlabelled fence)
//! 2. The first balanced `{ ... }` or `[ ... ]`, whichever starts first

use scriptura_error::{OutputError, OutputErrorKind};
use serde::de::DeserializeOwned;

/// Extract a JSON document from a reply that may contain markdown or extra text.
///
/// # Errors
///
/// Returns [`OutputErrorKind::Empty`] for a blank reply and
/// [`OutputErrorKind::Unparseable`] when no JSON is found.
///
/// # Examples
///
/// ```
/// use scriptura_flows::extract_json;
///
/// let reply = "Here it is:\n```json\n{\"quote\": \"Mind the light.\"}\n```";
/// assert_eq!(extract_json(reply).unwrap(), "{\"quote\": \"Mind the light.\"}");
/// ```
pub fn extract_json(response: &str) -> Result<String, OutputError> {
    if response.trim().is_empty() {
        return Err(OutputError::new(OutputErrorKind::Empty));
    }

    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let extracted = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => extract_balanced(response, '[', ']')
            .or_else(|| extract_balanced(response, '{', '}')),
        (Some(_), None) => extract_balanced(response, '[', ']'),
        _ => extract_balanced(response, '{', '}')
            .or_else(|| extract_balanced(response, '[', ']')),
    };

    extracted.ok_or_else(|| {
        tracing::debug!(response_length = response.len(), "No JSON found in reply");
        OutputError::new(OutputErrorKind::Unparseable(format!(
            "no JSON found in reply of {} characters",
            response.len()
        )))
    })
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        // A missing closing fence means a truncated reply; take the rest
        let content = match response[content_start..].find("```") {
            Some(end) => &response[content_start..content_start + end],
            None => &response[content_start..],
        };
        return Some(content.trim().to_string());
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters, skipping string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse a reply into `T`, extracting the JSON first.
///
/// # Errors
///
/// Returns [`OutputErrorKind::Unparseable`] if the JSON does not match `T`.
///
/// # Examples
///
/// ```
/// use scriptura_flows::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Twist {
///     twist: String,
/// }
///
/// let twist: Twist = parse_json("Sure! {\"twist\": \"The keeper is the smuggler.\"}").unwrap();
/// assert_eq!(twist.twist, "The keeper is the smuggler.");
/// ```
pub fn parse_json<T>(response: &str) -> Result<T, OutputError>
where
    T: DeserializeOwned,
{
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::debug!(error = %e, json_preview = %preview, "JSON parsing failed");
        OutputError::new(OutputErrorKind::Unparseable(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabelled_fence() {
        let reply = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn truncated_fence_takes_rest() {
        let reply = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let reply = r#"Result: {"quote": "a } in text", "n": {"x": 2}} trailing"#;
        assert_eq!(
            extract_json(reply).unwrap(),
            r#"{"quote": "a } in text", "n": {"x": 2}}"#
        );
    }

    #[test]
    fn array_first_wins() {
        let reply = r#"["a", {"b": 1}]"#;
        assert_eq!(extract_json(reply).unwrap(), reply);
    }

    #[test]
    fn blank_reply_is_empty() {
        let err = extract_json("  \n ").unwrap_err();
        assert_eq!(err.kind, OutputErrorKind::Empty);
    }

    #[test]
    fn prose_is_unparseable() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        assert!(matches!(err.kind, OutputErrorKind::Unparseable(_)));
    }
}
