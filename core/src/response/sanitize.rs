use crate::error::{CoreError, CoreResult};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

fn backtick_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"("content"\s*:\s*)`((?:\\`|[^`])*)`"#).expect("backtick content pattern")
    })
}

/// Placeholder tokens handed out during one sanitize pass.
///
/// Lives only inside [`sanitize_backtick_json`]; tokens never escape it.
#[derive(Debug, Default)]
struct PlaceholderMap {
    originals: HashMap<String, String>,
}

impl PlaceholderMap {
    fn allocate(&mut self, original: String) -> String {
        let token = format!("__BT_{}__", self.originals.len());
        self.originals.insert(token.clone(), original);
        token
    }

    fn original(&self, token: &str) -> Option<&str> {
        self.originals.get(token).map(String::as_str)
    }
}

/// Turn a template-literal style body into the text it stands for.
///
/// The order is significant: backslash collapse runs after the escapes that
/// start with a backslash.
pub fn unescape_backtick_body(body: &str) -> String {
    body.replace("\\`", "`")
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\${", "${")
}

/// Parse JSON whose `"content"` values may be backtick-delimited strings.
///
/// Each `"content": `...`` span is swapped for a placeholder string, the
/// document is parsed strictly, and placeholders are then swapped back for
/// the unescaped bodies. A string value that happens to equal a live token is
/// replaced too; tokens are improbable enough that this is accepted.
pub fn sanitize_backtick_json(text: &str) -> CoreResult<Value> {
    let mut placeholders = PlaceholderMap::default();

    let replaced = backtick_content_re().replace_all(text, |caps: &Captures<'_>| {
        let token = placeholders.allocate(unescape_backtick_body(&caps[2]));
        format!("{}\"{}\"", &caps[1], token)
    });

    let parsed: Value = serde_json::from_str(&replaced).map_err(|e| CoreError::Sanitize {
        reason: e.to_string(),
        text: replaced.to_string(),
    })?;

    Ok(restore_placeholders(parsed, &placeholders))
}

fn restore_placeholders(value: Value, placeholders: &PlaceholderMap) -> Value {
    match value {
        Value::String(s) => match placeholders.original(&s) {
            Some(original) => Value::String(original.to_string()),
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| restore_placeholders(v, placeholders))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, restore_placeholders(v, placeholders)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unescape_order() {
        assert_eq!(unescape_backtick_body(r"a\`b"), "a`b");
        assert_eq!(unescape_backtick_body(r"line1\nline2\tx"), "line1\nline2\tx");
        assert_eq!(unescape_backtick_body(r"C:\\dir"), r"C:\dir");
        assert_eq!(unescape_backtick_body(r#"say \"hi\" it\'s"#), r#"say "hi" it's"#);
        assert_eq!(unescape_backtick_body(r"\${name}"), "${name}");
    }

    #[test]
    fn test_multiline_backtick_content_is_restored() {
        let text = "{\"files\": [{\"path\": \"src/App.tsx\", \"content\": `const a = \"x\";\nconst b = \\`${a}\\`;\n`}]}";
        let v = sanitize_backtick_json(text).unwrap();
        assert_eq!(
            v["files"][0]["content"],
            json!("const a = \"x\";\nconst b = `${a}`;\n")
        );
        assert_eq!(v["files"][0]["path"], json!("src/App.tsx"));
    }

    #[test]
    fn test_each_block_gets_its_own_token() {
        let text = "{\"files\": [{\"path\": \"src/a.ts\", \"content\": `A`}, {\"path\": \"src/b.ts\", \"content\":`B`}]}";
        let v = sanitize_backtick_json(text).unwrap();
        assert_eq!(v["files"][0]["content"], json!("A"));
        assert_eq!(v["files"][1]["content"], json!("B"));
    }

    #[test]
    fn test_backticks_in_other_keys_are_not_repaired() {
        let text = "{\"files\": [{\"path\": `src/a.ts`, \"content\": \"x\"}]}";
        let err = sanitize_backtick_json(text).unwrap_err();
        match err {
            CoreError::Sanitize { text, .. } => assert!(text.contains("`src/a.ts`")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plain_json_passes_through() {
        let v = sanitize_backtick_json(r#"{"files": [], "n": 1, "ok": true}"#).unwrap();
        assert_eq!(v, json!({"files": [], "n": 1, "ok": true}));
    }

    #[test]
    fn test_restore_walks_nested_values_but_not_keys() {
        let mut placeholders = PlaceholderMap::default();
        let token = placeholders.allocate("hello".to_string());
        let value = json!({ token.clone(): [null, 1, { "deep": token.clone() }] });
        let restored = restore_placeholders(value, &placeholders);
        assert_eq!(restored, json!({ token: [null, 1, { "deep": "hello" }] }));
    }
}
