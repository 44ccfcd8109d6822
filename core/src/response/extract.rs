use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::sync::OnceLock;

fn fenced_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```json\s*([\s\S]*?)```").expect("fenced json pattern"))
}

/// Isolate the JSON document inside a raw model response.
///
/// Order of preference:
/// 1. the interior of the first ```` ```json ```` fence (trimmed)
/// 2. the whole trimmed text when it already looks like an object
/// 3. the span from the first `{` to the last `}`
///
/// This is heuristic. Braces in prose around the real document can skew the
/// third rule; the strict parse downstream rejects what it gets wrong.
pub fn extract_json_block(raw: &str) -> CoreResult<&str> {
    if let Some(caps) = fenced_json_re().captures(raw) {
        if let Some(body) = caps.get(1) {
            return Ok(body.as_str().trim());
        }
    }

    let text = raw.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return Ok(text);
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            return Ok(&text[first..=last]);
        }
    }

    Err(CoreError::Extraction(format!(
        "no JSON object found in {} bytes of model output",
        raw.len()
    )))
}
