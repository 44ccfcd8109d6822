use crate::error::{CoreError, CoreResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Whatever produces the raw model text for a prompt.
///
/// The network-backed client lives outside this crate; the pipeline only
/// needs text back.
pub trait ModelClient {
    fn generate(&self, prompt: &str, model: &str) -> CoreResult<String>;
}

/// Replays a response captured earlier, skipping the model call entirely.
#[derive(Debug, Clone)]
pub struct RawResponseFile {
    path: PathBuf,
}

impl RawResponseFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ModelClient for RawResponseFile {
    fn generate(&self, _prompt: &str, _model: &str) -> CoreResult<String> {
        tracing::info!(path = %self.path.display(), "using raw response file");
        let text = fs::read_to_string(&self.path)?;
        ensure_non_empty(text)
    }
}

/// A fixed response, handy for tests and embedding callers.
#[derive(Debug, Clone)]
pub struct StaticResponse(pub String);

impl ModelClient for StaticResponse {
    fn generate(&self, _prompt: &str, _model: &str) -> CoreResult<String> {
        ensure_non_empty(self.0.clone())
    }
}

fn ensure_non_empty(text: String) -> CoreResult<String> {
    if text.trim().is_empty() {
        return Err(CoreError::InvalidInput("empty model response".to_string()));
    }
    Ok(text)
}
