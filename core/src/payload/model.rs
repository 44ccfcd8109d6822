use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One file the model asked for.
///
/// `content` wins over `content_lines` when both are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_lines: Option<Vec<String>>,
}

impl FileEntry {
    /// Project a raw payload item into an entry. Items that are not objects
    /// yield `None` rather than an error.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let path = obj.get("path").map(value_text).unwrap_or_default();
        let content = obj
            .get("content")
            .and_then(Value::as_str)
            .map(str::to_string);
        let content_lines = obj
            .get("content_lines")
            .and_then(Value::as_array)
            .map(|lines| lines.iter().map(value_text).collect());
        Some(Self {
            path: path.trim().to_string(),
            content,
            content_lines,
        })
    }

    pub fn resolved_content(&self) -> Option<String> {
        if let Some(c) = &self.content {
            return Some(c.clone());
        }
        self.content_lines.as_ref().map(|lines| lines.join("\n"))
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

// Strings verbatim, anything else as its JSON text.
fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The `files` list of a parsed response, kept as raw values so that each
/// item can be accepted or skipped on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPayload {
    files: Vec<Value>,
}

impl GenerationPayload {
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        match value.get("files") {
            Some(Value::Array(files)) => Ok(Self {
                files: files.clone(),
            }),
            Some(_) => Err(CoreError::PayloadShape(
                "'files' must be a list".to_string(),
            )),
            None => Err(CoreError::PayloadShape(
                "missing 'files' list".to_string(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = Option<FileEntry>> + '_ {
        self.files.iter().map(FileEntry::from_value)
    }
}
