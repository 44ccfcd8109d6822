pub mod extract;
pub mod sanitize;

use crate::error::CoreResult;
use serde_json::Value;

/// Recover the JSON document a model meant to emit.
///
/// Strict JSON is tried first; backtick repair is only the fallback.
pub fn parse_model_response(raw: &str) -> CoreResult<Value> {
    let json_text = extract::extract_json_block(raw)?;
    match serde_json::from_str::<Value>(json_text) {
        Ok(v) => Ok(v),
        Err(_) => sanitize::sanitize_backtick_json(json_text),
    }
}
