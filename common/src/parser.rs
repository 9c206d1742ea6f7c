//! Classifier response parser
//!
//! AI responses are asked for raw JSON but regularly arrive wrapped in
//! markdown fences or surrounded by prose. This module finds the JSON
//! object in that noise and hands back its text unchanged.

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    // opening ```json / ``` fence
    static ref OPEN_FENCE_RE: Regex = Regex::new(r"```(?:json|JSON)?").unwrap();
}

/// End index of the object opening at `text[0]`, skipping braces in strings
fn object_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// First balanced `{ ... }` span that is valid JSON
fn first_object(text: &str) -> Option<&str> {
    text.match_indices('{').find_map(|(start, _)| {
        let end = start + object_end(&text[start..])?;
        let candidate = &text[start..=end];
        serde_json::from_str::<Value>(candidate).ok().map(|_| candidate)
    })
}

/// Extract the JSON object from a response
///
/// Extraction order:
/// 1. the first object after an opening ```` ```json ```` or ```` ``` ```` fence
/// 2. the first object anywhere in the response
/// 3. otherwise an error
///
/// Text inside the object, fences included, is returned as is.
///
/// # Examples
/// ```
/// use baggage_check_common::extract_json_object;
///
/// let response = "```json\n{\"identified\": false}\n```";
/// let json = extract_json_object(response).unwrap();
/// assert_eq!(json, "{\"identified\": false}");
/// ```
pub fn extract_json_object(response: &str) -> Result<String> {
    let fenced = OPEN_FENCE_RE
        .find_iter(response)
        .find_map(|m| first_object(&response[m.end()..]));

    fenced
        .or_else(|| first_object(response))
        .map(str::to_string)
        .ok_or_else(|| Error::MalformedClassificationResult("no JSON object in response".into()))
}

/// Parse a response into a JSON object value
pub fn parse_response_object(response: &str) -> Result<Value> {
    let json_str = extract_json_object(response)?;
    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| Error::MalformedClassificationResult(format!("invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(Error::MalformedClassificationResult(
            "response is not a JSON object".into(),
        ));
    }
    Ok(value)
}
