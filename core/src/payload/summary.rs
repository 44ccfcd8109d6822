use crate::payload::model::{FileEntry, GenerationPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Page,
    Style,
    Config,
    Component,
}

impl FileKind {
    /// Guess what a file is from its name alone.
    pub fn classify(file_name: &str) -> Self {
        if file_name.contains("pages") {
            FileKind::Page
        } else if file_name.contains(".css") {
            FileKind::Style
        } else if file_name.contains(".json") {
            FileKind::Config
        } else {
            FileKind::Component
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub content: String,
}

impl FileSummary {
    pub fn from_entry(entry: &FileEntry) -> Self {
        let name = entry.file_name().to_string();
        Self {
            kind: FileKind::classify(&name),
            name,
            path: entry.path.clone(),
            content: entry.resolved_content().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationSummary {
    pub uid: String,
    pub target_dir: String,
    pub files: Vec<FileSummary>,
}

/// One row per payload entry that names a path, in payload order.
pub fn summarize_files(payload: &GenerationPayload) -> Vec<FileSummary> {
    payload
        .entries()
        .flatten()
        .filter(|e| !e.path.is_empty())
        .map(|e| FileSummary::from_entry(&e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_by_name() {
        assert_eq!(FileKind::classify("pages.tsx"), FileKind::Page);
        assert_eq!(FileKind::classify("theme.css"), FileKind::Style);
        assert_eq!(FileKind::classify("settings.json"), FileKind::Config);
        assert_eq!(FileKind::classify("Header.tsx"), FileKind::Component);
    }

    #[test]
    fn test_summary_rows_follow_payload() {
        let payload = GenerationPayload::from_value(&json!({"files": [
            {"path": "src/styles/app.css", "content": "body {}"},
            "garbage",
            {"path": "", "content": "x"},
            {"path": "src/App.tsx", "content_lines": ["a", "b"]}
        ]}))
        .unwrap();
        let rows = summarize_files(&payload);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "app.css");
        assert_eq!(rows[0].kind, FileKind::Style);
        assert_eq!(rows[1].content, "a\nb");

        let v = serde_json::to_value(&rows[1]).unwrap();
        assert_eq!(v["type"], json!("component"));
    }
}
