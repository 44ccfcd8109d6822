use crate::audit::report::Reporter;
use crate::content::normalize::normalize_code_content;
use crate::error::CoreResult;
use crate::materialize::containment::{is_within, resolve_path};
use crate::payload::model::{FileEntry, GenerationPayload};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const SRC_PREFIX: &str = "src/";
pub const PUBLIC_PREFIX: &str = "public/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Also accept paths under `public/`.
    pub allow_public: bool,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotAnObject,
    MissingContent,
    EmptyPath,
    DisallowedPrefix,
    OutsideRoot,
    AlreadyExists,
    WriteFailed,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Absolute paths, in payload order.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
}

/// Writes payload entries under one root, refusing anything that would land
/// outside it.
pub struct FileMaterializer {
    root: PathBuf,
    options: WriteOptions,
}

impl FileMaterializer {
    pub fn new(target_root: &Path, options: WriteOptions) -> CoreResult<Self> {
        Ok(Self {
            root: resolve_path(target_root)?,
            options,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_all(
        &self,
        payload: &GenerationPayload,
        reporter: &mut dyn Reporter,
    ) -> CoreResult<WriteResult> {
        let mut result = WriteResult::default();
        for (index, entry) in payload.entries().enumerate() {
            match self.write_entry(entry, reporter) {
                Ok(path) => result.written.push(path),
                Err((path, reason)) => result.skipped.push(SkippedEntry {
                    index,
                    path,
                    reason,
                }),
            }
        }
        Ok(result)
    }

    fn path_allowed(&self, rel_path: &str) -> bool {
        rel_path.starts_with(SRC_PREFIX)
            || (self.options.allow_public && rel_path.starts_with(PUBLIC_PREFIX))
    }

    fn write_entry(
        &self,
        entry: Option<FileEntry>,
        reporter: &mut dyn Reporter,
    ) -> Result<PathBuf, (String, SkipReason)> {
        let entry = entry.ok_or((String::new(), SkipReason::NotAnObject))?;
        let rel_path = entry.path.clone();

        let content = match entry.resolved_content() {
            Some(c) => c,
            None => {
                reporter.info(&format!("Skipping entry without content: {}", rel_path));
                return Err((rel_path, SkipReason::MissingContent));
            }
        };
        if rel_path.is_empty() {
            return Err((rel_path, SkipReason::EmptyPath));
        }

        if !self.path_allowed(&rel_path) {
            reporter.warn(&format!("Skipping disallowed path: {}", rel_path));
            return Err((rel_path, SkipReason::DisallowedPrefix));
        }

        let abs_path = match resolve_path(&self.root.join(&rel_path)) {
            Ok(p) if is_within(&self.root, &p) => p,
            _ => {
                reporter.warn(&format!("Skipping non-contained path: {}", rel_path));
                return Err((rel_path, SkipReason::OutsideRoot));
            }
        };

        if let Some(parent) = abs_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                reporter.warn(&format!("Cannot create directory for {}: {}", rel_path, e));
                return Err((rel_path, SkipReason::WriteFailed));
            }
        }

        if abs_path.exists() && !self.options.overwrite {
            reporter.info(&format!("Exists (skip): {}", rel_path));
            return Err((rel_path, SkipReason::AlreadyExists));
        }

        let normalized = normalize_code_content(&content, &rel_path);
        if let Err(e) = fs::write(&abs_path, normalized) {
            reporter.warn(&format!("Failed to write {}: {}", rel_path, e));
            return Err((rel_path, SkipReason::WriteFailed));
        }
        Ok(abs_path)
    }
}

/// Materialize every usable entry of `payload` under `target_root`.
///
/// Only a payload without a `files` list is an error; every per-entry
/// problem is reported and recorded in [`WriteResult::skipped`].
pub fn write_files(
    target_root: &Path,
    payload: &Value,
    options: WriteOptions,
    reporter: &mut dyn Reporter,
) -> CoreResult<WriteResult> {
    let payload = GenerationPayload::from_value(payload)?;
    FileMaterializer::new(target_root, options)?.write_all(&payload, reporter)
}
