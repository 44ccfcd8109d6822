use crate::error::{CoreError, CoreResult};
use crate::materialize::containment::is_within;
use crate::materialize::writer::WriteOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_DIR: &str = "template-react-ts";
pub const DEFAULT_OUT_ROOT: &str = "generated-app";
pub const DEFAULT_RESPONSES_DIR: &str = "model-responses";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PROMPT: &str = "Create a sample page that says hello using Material UI Button.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Project template copied into every run's output directory.
    pub template_dir: PathBuf,
    /// Parent of the per-run `<uid>` directories.
    pub out_root: PathBuf,
    pub responses_dir: PathBuf,
    pub model: String,
    pub prompt: String,
    pub allow_public: bool,
    pub overwrite: bool,
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            out_root: PathBuf::from(DEFAULT_OUT_ROOT),
            responses_dir: PathBuf::from(DEFAULT_RESPONSES_DIR),
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            allow_public: false,
            overwrite: true,
            dry_run: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !self.template_dir.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "template dir not found: {}",
                self.template_dir.display()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(CoreError::InvalidInput("model name is empty".to_string()));
        }
        // The snapshot would otherwise copy its own output into itself.
        if is_within(&self.template_dir, &self.out_root) {
            return Err(CoreError::InvalidInput(format!(
                "out root {} lies inside template dir {}",
                self.out_root.display(),
                self.template_dir.display()
            )));
        }
        Ok(())
    }

    /// The prompt to send, falling back to the default for blank input.
    pub fn effective_prompt(&self) -> &str {
        if self.prompt.trim().is_empty() {
            DEFAULT_PROMPT
        } else {
            &self.prompt
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            allow_public: self.allow_public,
            overwrite: self.overwrite,
        }
    }
}
