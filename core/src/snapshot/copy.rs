use crate::error::{CoreError, CoreResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Build output and package-manager directories never copied out of a template.
pub const EXCLUDED_DIR_NAMES: [&str; 7] = [
    "node_modules",
    "dist",
    ".next",
    ".turbo",
    ".parcel-cache",
    ".vite",
    "build",
];

fn copy_err(path: &Path) -> impl FnOnce(io::Error) -> CoreError + '_ {
    move |source| CoreError::Copy {
        path: path.to_path_buf(),
        source,
    }
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIR_NAMES.contains(&name))
            .unwrap_or(false)
}

/// Replace `target_root` with a fresh copy of `template_root`.
///
/// An existing target is deleted first, without asking. Excluded directories
/// are pruned wherever they appear and never descended into.
pub fn copy_template_to(template_root: &Path, target_root: &Path) -> CoreResult<()> {
    if target_root.exists() {
        fs::remove_dir_all(target_root).map_err(copy_err(target_root))?;
    }
    fs::create_dir_all(target_root).map_err(copy_err(target_root))?;

    let walker = WalkDir::new(template_root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| template_root.to_path_buf());
            CoreError::Copy {
                path,
                source: io::Error::new(io::ErrorKind::Other, err),
            }
        })?;
        let rel = match entry.path().strip_prefix(template_root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => continue,
        };
        let dest: PathBuf = target_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(copy_err(&dest))?;
        } else {
            fs::copy(entry.path(), &dest).map_err(copy_err(entry.path()))?;
        }
    }
    Ok(())
}
