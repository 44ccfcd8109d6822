use crate::error::CoreResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of parsed model responses, one `<uid>.json` per run.
pub struct ResponseArchive {
    dir: PathBuf,
}

impl ResponseArchive {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, uid: &str) -> PathBuf {
        self.dir.join(format!("{}.json", uid))
    }

    pub fn save(&self, uid: &str, payload: &Value) -> CoreResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(uid);
        fs::write(&path, to_pretty_bytes(payload)?)?;
        Ok(path)
    }
}

// Four-space indentation, as the archive has always been written.
fn to_pretty_bytes(value: &Value) -> CoreResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(out)
}
